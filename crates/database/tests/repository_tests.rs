use jackfruit_config::DatabaseConfig;
use jackfruit_database::{
    initialize_database, NewUser, StoreError, UserChanges, UserRepository, UserStore,
};
use tempfile::TempDir;

struct TestDb {
    repo: UserRepository,
    _temp_dir: TempDir,
}

impl TestDb {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("repository.sqlite");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 2,
        };

        let pool = initialize_database(&config)
            .await
            .expect("initialise database");

        Self {
            repo: UserRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "$argon2id$v=19$stub".to_string(),
    }
}

#[tokio::test]
async fn create_and_fetch_user() {
    let db = TestDb::new().await;

    let created = db.repo.create(new_user("alice")).await.unwrap();
    assert!(created.id > 0);
    assert!(created.is_active);
    assert_eq!(created.username, "alice");

    let by_id = db.repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_name = db.repo.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(by_name.id, created.id);
    assert_eq!(by_name.password_hash, "$argon2id$v=19$stub");
}

#[tokio::test]
async fn duplicate_username_is_reported() {
    let db = TestDb::new().await;

    db.repo.create(new_user("alice")).await.unwrap();
    let result = db.repo.create(new_user("alice")).await;

    assert_eq!(result, Err(StoreError::UsernameTaken));
    assert_eq!(db.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn username_exists_is_case_sensitive() {
    let db = TestDb::new().await;
    db.repo.create(new_user("alice")).await.unwrap();

    assert!(db.repo.username_exists("alice").await.unwrap());
    assert!(!db.repo.username_exists("bob").await.unwrap());
}

#[tokio::test]
async fn update_overwrites_only_provided_fields() {
    let db = TestDb::new().await;
    let created = db.repo.create(new_user("alice")).await.unwrap();

    let changes = UserChanges {
        first_name: Some("Alice".to_string()),
        email: Some(String::new()),
        ..Default::default()
    };
    let updated = db.repo.update(created.id, &changes).await.unwrap();

    assert_eq!(updated.first_name, "Alice");
    assert_eq!(updated.email, "");
    assert_eq!(updated.last_name, created.last_name);
    assert_eq!(updated.username, created.username);
}

#[tokio::test]
async fn update_unknown_user_fails() {
    let db = TestDb::new().await;

    let changes = UserChanges {
        first_name: Some("Ghost".to_string()),
        ..Default::default()
    };
    let result = db.repo.update(999, &changes).await;

    assert_eq!(result, Err(StoreError::UserNotFound));
}

#[tokio::test]
async fn list_returns_users_in_id_order() {
    let db = TestDb::new().await;
    db.repo.create(new_user("bob")).await.unwrap();
    db.repo.create(new_user("alice")).await.unwrap();

    let users = db.repo.list().await.unwrap();
    let names: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();

    assert_eq!(names, vec!["bob", "alice"]);
}
