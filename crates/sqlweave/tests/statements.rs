use sqlweave::{
    Expr, Fragment, JoinDirection, JoinType, Lexer, LexerConfig, MySqlDialect, PostgresDialect,
    QueryBuilder, RenderConfig, Sql92Dialect, SqlError, SqlResult,
};

#[test]
fn report_query_renders_per_dialect() -> SqlResult<()> {
    fn report(qb: &QueryBuilder<impl sqlweave::Dialect>) -> SqlResult<String> {
        let recent = qb
            .select()
            .column("customer_id")
            .from("orders")
            .where_("placed_at >= :since");
        let query = qb
            .select()
            .column("c.id")
            .column_as("SUM(o.total)", "spent")
            .from_as("customers", "c")
            .join_as(
                "orders",
                "o",
                "o.customer_id = c.id",
                JoinType::Outer,
                Some(JoinDirection::Left),
            )
            .where_(Fragment::in_subquery("c.id", recent))
            .and_where(Expr::like("c.email", Expr::string("%@example.com")))
            .group_by("c.id")
            .having("SUM(o.total) > 100")
            .order_by_desc("spent")
            .limit(10);
        qb.sql(&query)
    }

    assert_eq!(
        report(&QueryBuilder::default())?,
        "SELECT c . id , SUM ( o . total ) AS spent FROM customers AS c \
         LEFT OUTER JOIN orders AS o ON ( o . customer_id = c . id ) \
         WHERE c . id IN ( SELECT customer_id FROM orders WHERE placed_at >= :since ) \
         AND c . email LIKE '%@example.com' \
         GROUP BY c . id HAVING SUM ( o . total ) > 100 ORDER BY spent DESC LIMIT 10"
    );

    assert_eq!(
        report(&QueryBuilder::new(MySqlDialect::new()))?,
        "SELECT c . id , SUM ( o . total ) AS spent FROM customers AS c \
         LEFT OUTER JOIN orders AS o ON ( o . customer_id = c . id ) \
         WHERE BINARY c . id IN ( SELECT customer_id FROM orders WHERE BINARY placed_at >= :since ) \
         AND BINARY c . email LIKE BINARY '%@example.com' \
         GROUP BY c . id HAVING SUM ( o . total ) > 100 ORDER BY spent DESC LIMIT 10"
    );

    assert_eq!(
        report(&QueryBuilder::new(PostgresDialect::new()))?,
        "SELECT \"c\" . \"id\" , SUM ( \"o\" . \"total\" ) AS \"spent\" FROM \"customers\" AS \"c\" \
         LEFT OUTER JOIN \"orders\" AS \"o\" ON ( \"o\" . \"customer_id\" = \"c\" . \"id\" ) \
         WHERE \"c\" . \"id\" IN ( SELECT \"customer_id\" FROM \"orders\" WHERE \"placed_at\" >= :since ) \
         AND \"c\" . \"email\" LIKE '%@example.com' \
         GROUP BY \"c\" . \"id\" HAVING SUM ( \"o\" . \"total\" ) > 100 ORDER BY \"spent\" DESC LIMIT 10"
    );
    Ok(())
}

#[test]
fn write_statements_round_out_the_api() -> SqlResult<()> {
    let qb = QueryBuilder::new(Sql92Dialect).with_config(RenderConfig::new().no_truncate());

    let insert = qb
        .insert()
        .into("people")
        .columns(["name", "nickname"])
        .values([Expr::string("O'Brien"), Expr::raw("NULL")]);
    assert_eq!(
        qb.sql(&insert)?,
        "INSERT INTO people ( name , nickname ) VALUES ( 'O''Brien' , NULL )"
    );

    let update = qb
        .update()
        .table("people")
        .set(Expr::eq("nickname", Expr::string("Bri")))
        .where_(Expr::eq("name", Expr::string("O'Brien")));
    assert_eq!(
        qb.sql(&update)?,
        "UPDATE people SET nickname = 'Bri' WHERE name = 'O''Brien'"
    );

    let delete = qb
        .delete()
        .from("people")
        .where_(Expr::is_null("nickname"))
        .or_where(Expr::in_list("name", [Expr::string("a"), Expr::string("b")]));
    assert_eq!(
        qb.sql(&delete)?,
        "DELETE FROM people WHERE nickname IS NULL OR name IN ( 'a' , 'b' )"
    );
    Ok(())
}

#[test]
fn builder_errors_surface_at_render() {
    let qb = QueryBuilder::default();

    let bad_fragment = qb.select().column("price * 1.1 ;").from("items");
    assert!(qb.sql(&bad_fragment).unwrap_err().is_unrecognized_token());

    let bad_table = qb.insert().into("items (x)").values([1]);
    assert!(matches!(
        qb.sql(&bad_table).unwrap_err(),
        SqlError::InvalidIdentifier(_)
    ));

    let bad_arity = qb.insert().into("items").columns(["a"]).values([1, 2]);
    assert!(matches!(
        qb.sql(&bad_arity).unwrap_err(),
        SqlError::ArityMismatch { row: 1, columns: 1, values: 2 }
    ));
}

#[test]
fn permissive_lexer_is_shared_by_builders() -> SqlResult<()> {
    let qb = QueryBuilder::default().with_lexer(Lexer::with_config(LexerConfig::new().permissive()));
    let query = qb.select().column("a % 2").from("t");
    assert_eq!(qb.sql(&query)?, "SELECT a % 2 FROM t");
    Ok(())
}

#[test]
fn rendering_is_repeatable_and_thread_safe() {
    let query = sqlweave::select()
        .column("id")
        .from("users")
        .where_(Expr::eq("name", Expr::string("x")));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let query = query.clone();
            std::thread::spawn(move || QueryBuilder::new(MySqlDialect::new()).sql(&query))
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap().unwrap(),
            "SELECT id FROM users WHERE BINARY name = 'x'"
        );
    }
}
