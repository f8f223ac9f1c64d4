use fake::faker::lorem::en::Word;
use fake::Fake;
use income_repo::category_repo::NewCategory;
use income_repo::income_repo::NewIncome;
use rust_decimal::Decimal;
use uuid::Uuid;

pub trait Generator<T> {
    fn gen(&mut self) -> T;
}

pub struct Predefined<T> {
    values: Vec<T>,
    current_pos: usize,
}

impl<T> Predefined<T> {
    pub fn boxed(values: Vec<T>) -> Box<Predefined<T>> {
        Box::new(Predefined {
            values,
            current_pos: 0,
        })
    }
}

impl<T: Clone> Generator<T> for Predefined<T> {
    fn gen(&mut self) -> T {
        let v = self.values[self.current_pos].clone();
        self.current_pos += 1;
        v
    }
}

/// Words suffixed with a uuid so tags and names never collide between tests sharing a database.
pub struct UniqueWord;

impl Generator<String> for UniqueWord {
    fn gen(&mut self) -> String {
        let word: String = Word().fake();
        format!("{}-{}", word, Uuid::new_v4())
    }
}

pub struct FakeValue;

impl Generator<Decimal> for FakeValue {
    fn gen(&mut self) -> Decimal {
        Decimal::new((0..10_000_000i64).fake(), 2)
    }
}

pub struct FakeUserId;

impl Generator<i32> for FakeUserId {
    fn gen(&mut self) -> i32 {
        (1..10_000).fake()
    }
}

pub struct NewCategoryGenerator {
    tag_gen: Box<dyn Generator<String>>,
}

impl NewCategoryGenerator {
    pub fn generate(&mut self) -> NewCategory {
        NewCategory::new(self.tag_gen.gen())
    }
}

impl Default for NewCategoryGenerator {
    fn default() -> Self {
        NewCategoryGenerator {
            tag_gen: Box::new(UniqueWord),
        }
    }
}

#[allow(dead_code)]
pub struct NewIncomeGenerator {
    name_gen: Box<dyn Generator<String>>,
    value_gen: Box<dyn Generator<Decimal>>,
    user_gen: Box<dyn Generator<i32>>,
}

#[allow(dead_code)]
impl NewIncomeGenerator {
    pub fn with_names(mut self, names: Vec<&str>) -> NewIncomeGenerator {
        let names = names.into_iter().map(|s| s.to_string()).collect();
        self.name_gen = Predefined::boxed(names);
        self
    }

    pub fn with_values(mut self, values: Vec<Decimal>) -> NewIncomeGenerator {
        self.value_gen = Predefined::boxed(values);
        self
    }

    pub fn generate(&mut self, category_ids: Vec<i32>) -> NewIncome {
        NewIncome::new(
            self.name_gen.gen(),
            self.value_gen.gen(),
            self.user_gen.gen(),
            category_ids,
        )
    }

    pub fn generate_many(&mut self, count: usize) -> Vec<NewIncome> {
        let mut vec = Vec::with_capacity(count);
        for _ in 0..count {
            vec.push(self.generate(Vec::new()))
        }
        vec
    }
}

impl Default for NewIncomeGenerator {
    fn default() -> Self {
        NewIncomeGenerator {
            name_gen: Box::new(UniqueWord),
            value_gen: Box::new(FakeValue),
            user_gen: Box::new(FakeUserId),
        }
    }
}
