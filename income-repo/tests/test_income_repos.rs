mod utils;

use income_repo::income_repo::{IncomeRepoError, IncomeUpdate, NewIncome};
use income_repo::{Filter, PageOptions};
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;
use utils::generator::{NewCategoryGenerator, NewIncomeGenerator};
use utils::RepoType;
use uuid::Uuid;

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_and_get_income(#[case] repo_type: RepoType) {
    let Some((category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut category_generator = NewCategoryGenerator::default();
    let mut income_generator = NewIncomeGenerator::default();

    let salary = category_repo
        .create_category(category_generator.generate())
        .await
        .unwrap();
    let monthly = category_repo
        .create_category(category_generator.generate())
        .await
        .unwrap();

    let new_income = income_generator.generate(vec![salary.id, monthly.id]);
    let income = income_repo
        .create_income(new_income.clone())
        .await
        .unwrap();
    assert_eq!(income.name, new_income.name);
    assert_eq!(income.value, new_income.value);
    assert_eq!(income.user_id, new_income.user_id);
    assert_eq!(income.categories, vec![salary.clone(), monthly.clone()]);

    let stored = income_repo.get_income(income.id).await.unwrap();
    assert_eq!(stored, income);

    income_repo.delete_income(income.id).await.unwrap();
    category_repo.delete_category(salary.id).await.unwrap();
    category_repo.delete_category(monthly.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_create_income_with_unknown_category(#[case] repo_type: RepoType) {
    let Some((_category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut income_generator = NewIncomeGenerator::default();

    let new_income = income_generator.generate(vec![-1]);
    let result = income_repo.create_income(new_income.clone()).await;
    assert!(matches!(result, Err(IncomeRepoError::UnknownCategory)));

    let page = income_repo
        .get_all_incomes(Filter::by_name(new_income.name), None)
        .await
        .unwrap();
    assert_eq!(page.count, 0);
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_get_invalid_income(#[case] repo_type: RepoType) {
    let Some((_category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };

    let result = income_repo.get_income(-1).await;
    assert!(matches!(result, Err(IncomeRepoError::IncomeNotFound(-1))));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_get_all_incomes_paged(#[case] repo_type: RepoType) {
    let Some((_category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let name = format!("Salary-{}", Uuid::new_v4());
    let mut income_generator = NewIncomeGenerator::default().with_names(vec![name.as_str(); 5]);

    let mut ids = Vec::new();
    for new_income in income_generator.generate_many(5) {
        ids.push(income_repo.create_income(new_income).await.unwrap().id);
    }

    let page = income_repo
        .get_all_incomes(
            Filter::by_name(name.clone()),
            Some(PageOptions {
                offset: 2,
                limit: 2,
            }),
        )
        .await
        .unwrap();
    assert_eq!(page.count, 5);
    let page_ids: Vec<i32> = page.rows.iter().map(|i| i.id).collect();
    assert_eq!(page_ids, ids[2..4].to_vec());

    let last_page = income_repo
        .get_all_incomes(
            Filter::by_name(name.clone()),
            Some(PageOptions {
                offset: 4,
                limit: 2,
            }),
        )
        .await
        .unwrap();
    assert_eq!(last_page.rows.len(), 1);

    for id in ids {
        income_repo.delete_income(id).await.unwrap();
    }
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_update_income_fields(#[case] repo_type: RepoType) {
    let Some((_category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut income_generator = NewIncomeGenerator::default();

    let income = income_repo
        .create_income(income_generator.generate(Vec::new()))
        .await
        .unwrap();
    let other = income_repo
        .create_income(income_generator.generate(Vec::new()))
        .await
        .unwrap();

    let update = IncomeUpdate {
        value: Some(Decimal::from_str("1234.56").unwrap()),
        ..IncomeUpdate::default()
    };
    let updated = income_repo.update_income(income.id, update).await.unwrap();
    assert_eq!(updated.id, income.id);
    assert_eq!(updated.name, income.name);
    assert_eq!(updated.user_id, income.user_id);
    assert_eq!(updated.value, Decimal::from_str("1234.56").unwrap());

    let untouched = income_repo.get_income(other.id).await.unwrap();
    assert_eq!(untouched, other);

    income_repo.delete_income(income.id).await.unwrap();
    income_repo.delete_income(other.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_update_income_categories(#[case] repo_type: RepoType) {
    let Some((category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut category_generator = NewCategoryGenerator::default();

    let first = category_repo
        .create_category(category_generator.generate())
        .await
        .unwrap();
    let second = category_repo
        .create_category(category_generator.generate())
        .await
        .unwrap();

    let income = income_repo
        .create_income(NewIncome::new(
            "Rent".to_string(),
            Decimal::from(900),
            7,
            vec![first.id],
        ))
        .await
        .unwrap();

    let update = IncomeUpdate {
        category_ids: Some(vec![second.id]),
        ..IncomeUpdate::default()
    };
    let updated = income_repo.update_income(income.id, update).await.unwrap();
    assert_eq!(updated.categories, vec![second.clone()]);
    assert_eq!(updated.name, "Rent");

    let result = income_repo
        .update_income(
            income.id,
            IncomeUpdate {
                category_ids: Some(vec![-1]),
                ..IncomeUpdate::default()
            },
        )
        .await;
    assert!(matches!(result, Err(IncomeRepoError::UnknownCategory)));

    let result = income_repo
        .update_income(-1, IncomeUpdate::default())
        .await;
    assert!(matches!(result, Err(IncomeRepoError::IncomeNotFound(-1))));

    income_repo.delete_income(income.id).await.unwrap();
    category_repo.delete_category(first.id).await.unwrap();
    category_repo.delete_category(second.id).await.unwrap();
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_delete_income(#[case] repo_type: RepoType) {
    let Some((_category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut income_generator = NewIncomeGenerator::default();

    let income = income_repo
        .create_income(income_generator.generate(Vec::new()))
        .await
        .unwrap();

    let deleted = income_repo.delete_income(income.id).await.unwrap();
    assert_eq!(deleted, income);

    let result = income_repo.delete_income(income.id).await;
    assert!(matches!(result, Err(IncomeRepoError::IncomeNotFound(_))));
}

#[rstest]
#[case::sqlx(RepoType::SQLx)]
#[case::mem(RepoType::Mem)]
#[actix_rt::test]
async fn test_deleted_category_is_unlinked(#[case] repo_type: RepoType) {
    let Some((category_repo, income_repo, _health)) = utils::build_repos(repo_type).await else {
        return;
    };
    let mut category_generator = NewCategoryGenerator::default();
    let mut income_generator = NewIncomeGenerator::default();

    let category = category_repo
        .create_category(category_generator.generate())
        .await
        .unwrap();
    let income = income_repo
        .create_income(income_generator.generate(vec![category.id]))
        .await
        .unwrap();

    category_repo.delete_category(category.id).await.unwrap();

    let stored = income_repo.get_income(income.id).await.unwrap();
    assert!(stored.categories.is_empty());

    income_repo.delete_income(income.id).await.unwrap();
}
