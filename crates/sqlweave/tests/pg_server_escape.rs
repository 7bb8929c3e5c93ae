#![cfg(feature = "postgres")]

use sqlweave::{DialectProvider, Expr, PgEscape, PgServerEscaper, QueryBuilder, SqlResult};
use std::sync::Arc;
use tokio_postgres::NoTls;

#[test]
fn server_escaping_matches_quote_functions() -> SqlResult<()> {
    dotenvy::dotenv().ok();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping server_escaping_matches_quote_functions");
            return Ok(());
        }
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    let (client, connection) = runtime.block_on(tokio_postgres::connect(&database_url, NoTls))?;
    runtime.spawn(async move {
        let _ = connection.await;
    });

    let escaper = PgServerEscaper::new(Arc::new(client), runtime.handle().clone());
    assert_eq!(escaper.escape_literal("O'Brien")?, "'O''Brien'");
    assert_eq!(escaper.escape_identifier("users")?, "users");
    assert_eq!(escaper.escape_identifier("Mixed Case")?, "\"Mixed Case\"");

    let qb = QueryBuilder::from_provider(&escaper);
    let query = qb
        .select()
        .column("id")
        .from("users")
        .where_(Expr::eq("name", Expr::string("O'Brien")));
    assert_eq!(
        qb.sql(&query)?,
        "SELECT id FROM users WHERE name = 'O''Brien'"
    );
    assert_eq!(escaper.dialect().escaper().escape_literal("x")?, "'x'");
    Ok(())
}
