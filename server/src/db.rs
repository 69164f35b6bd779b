use bb8_postgres::PostgresConnectionManager;
use tokio_postgres::NoTls;

pub type Pool = bb8::Pool<PostgresConnectionManager<NoTls>>;
pub type Client<'a> = bb8::PooledConnection<'a, PostgresConnectionManager<NoTls>>;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

pub async fn pool(database_url: &str) -> anyhow::Result<Pool> {
    let mgr = PostgresConnectionManager::new(database_url.parse()?, NoTls);
    let pool = bb8::Pool::builder().build(mgr).await?;
    Ok(pool)
}

pub async fn health(pool: &Pool) -> anyhow::Result<()> {
    let client = pool.get().await?;
    client.simple_query("SELECT 1").await?;
    Ok(())
}

pub async fn migrate(database_url: &str) -> anyhow::Result<()> {
    let mut conn = pool(database_url).await?.dedicated_connection().await?;

    println!("Running migrations");
    embedded::migrations::runner().run_async(&mut conn).await?;
    Ok(())
}

pub async fn reset(database_url: &str) -> anyhow::Result<()> {
    let conn = pool(database_url).await?.dedicated_connection().await?;

    println!("Dropping forecast tables");
    conn.batch_execute(
        "DROP TABLE IF EXISTS forecast_records; \
         DROP TABLE IF EXISTS refinery_schema_history;",
    )
    .await?;

    migrate(database_url).await
}
