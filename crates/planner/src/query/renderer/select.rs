use crate::query::{
    ast::{
        common::JoinKind,
        select::{FromClause, JoinClause, Select},
    },
    renderer::{Render, Renderer},
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            col.render(r);
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r);
        }

        // 3. JOIN
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r);
        }

        // 4. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r);
        }

        // 5. HAVING
        if let Some(having) = &self.having {
            r.sql.push_str(" HAVING ");
            having.render(r);
        }
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("FROM ");
        r.render_table_ref(&self.table);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(&r.dialect.quote_identifier(alias));
        }
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) {
        let join_str = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        r.sql.push_str(&format!("{join_str} "));
        r.render_table_ref(&self.table);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(&r.dialect.quote_identifier(alias));
        }
        r.sql.push_str(" ON ");
        self.on.render(r);
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        query::{
            alias,
            ast::{common::JoinKind, expr::Expr},
            builder::select::SelectBuilder,
            dialect::{MySql, Postgres},
            eq, qualified,
            renderer::to_sql,
            value,
        },
        table_ref,
    };

    #[test]
    fn test_render_index_subselect_mysql() {
        let ast = SelectBuilder::new()
            .select(vec![
                qualified("e", "entity_id"),
                alias(qualified("main_table", "value"), "weight"),
            ])
            .from(table_ref!("catalog_product_entity"), Some("e"))
            .join(
                JoinKind::Inner,
                table_ref!("catalog_product_index_eav_decimal"),
                Some("main_table"),
                eq(
                    qualified("main_table", "entity_id"),
                    qualified("e", "entity_id"),
                ),
            )
            .where_clause(eq(
                qualified("main_table", "attribute_id"),
                value(Value::Int(82)),
            ))
            .where_clause(eq(qualified("main_table", "store_id"), value(Value::Int(1))))
            .having(Expr::Raw("(weight > 10)".into()))
            .build();

        let expected = concat!(
            "SELECT `e`.`entity_id`, `main_table`.`value` AS `weight` ",
            "FROM `catalog_product_entity` AS `e` ",
            "INNER JOIN `catalog_product_index_eav_decimal` AS `main_table` ",
            "ON (`main_table`.`entity_id` = `e`.`entity_id`) ",
            "WHERE (`main_table`.`attribute_id` = 82) AND (`main_table`.`store_id` = 1) ",
            "HAVING (weight > 10)"
        );
        assert_eq!(to_sql(&ast, &MySql), expected);
    }

    #[test]
    fn test_render_left_join_postgres() {
        let ast = SelectBuilder::new()
            .select(vec![qualified("e", "entity_id")])
            .from(table_ref!("catalog_product_entity"), Some("e"))
            .join(
                JoinKind::Left,
                table_ref!("catalog_product_entity_varchar"),
                Some("current_store"),
                Expr::Conjunction(vec![
                    eq(
                        qualified("current_store", "row_id"),
                        qualified("e", "row_id"),
                    ),
                    eq(
                        qualified("current_store", "store_id"),
                        value(Value::Int(2)),
                    ),
                ]),
            )
            .build();

        assert_eq!(
            to_sql(&ast, &Postgres),
            concat!(
                r#"SELECT "e"."entity_id" FROM "catalog_product_entity" AS "e" "#,
                r#"LEFT JOIN "catalog_product_entity_varchar" AS "current_store" "#,
                r#"ON ("current_store"."row_id" = "e"."row_id") "#,
                r#"AND ("current_store"."store_id" = 2)"#
            )
        );
    }
}
