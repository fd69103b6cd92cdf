use sqlx::SqlitePool;

pub async fn create_db_pool(database_url: &str) -> SqlitePool {
    // Create connection pool
    let pool = SqlitePool::connect(database_url)
        .await
        .expect("Failed to connect to the database");

    // Run migrations
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    pool
}
