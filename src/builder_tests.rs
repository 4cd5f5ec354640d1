#[cfg(test)]
mod tests {
    use crate::builder::StatementBuilder;
    use crate::dialect::{Capabilities, Dialect};
    use crate::flavor::Flavor;
    use crate::query::BuildError;
    use pretty_assertions::assert_eq;

    fn sqlite() -> StatementBuilder {
        StatementBuilder::for_flavor(Flavor::SQLite)
    }

    #[test]
    fn sqlite_drop_index() {
        let q = sqlite().drop_index("users", "idx");
        assert_eq!(q.sql(), Ok("DROP INDEX `idx`"));
    }

    #[test]
    fn sqlite_truncate_table() {
        let q = sqlite().truncate_table("users");
        assert_eq!(q.sql(), Ok("DELETE FROM `users`"));
    }

    #[test]
    fn sqlite_rename_table() {
        let q = sqlite().rename_table("usersOld", "usersNew");
        assert_eq!(q.sql(), Ok("ALTER TABLE `usersOld` RENAME TO `usersNew`"));
    }

    #[test]
    fn sqlite_alter_column_is_unsupported() {
        let q = sqlite().alter_column("users", "name", "int");
        assert_eq!(
            q.last_error(),
            Some(&BuildError::Unsupported {
                operation: "AlterColumn",
                dialect: "SQLite",
            })
        );
        assert!(q.sql().is_err());
    }

    #[test]
    fn sqlite_constraint_ddl_is_unsupported() {
        let b = sqlite();
        let queries = [
            b.add_primary_key("users", "pk", &["id1", "id2"]),
            b.drop_primary_key("users", "pk"),
            b.add_foreign_key("users", "fk", &["p1", "p2"], &["f1", "f2"], "profile", &["opt"]),
            b.drop_foreign_key("users", "fk"),
            b.drop_column("users", "name"),
            b.rename_column("users", "name", "nick"),
        ];
        for q in queries {
            assert!(q.last_error().is_some());
            assert!(q.into_parts().is_err());
        }
    }

    #[test]
    fn mysql_ddl() {
        let b = StatementBuilder::for_flavor(Flavor::MySQL);
        assert_eq!(
            b.rename_table("usersOld", "usersNew").sql(),
            Ok("RENAME TABLE `usersOld` TO `usersNew`")
        );
        assert_eq!(b.truncate_table("users").sql(), Ok("TRUNCATE TABLE `users`"));
        assert_eq!(
            b.drop_index("users", "idx").sql(),
            Ok("DROP INDEX `idx` ON `users`")
        );
        assert_eq!(
            b.alter_column("users", "name", "int").sql(),
            Ok("ALTER TABLE `users` CHANGE `name` `name` int")
        );
        assert_eq!(
            b.drop_primary_key("users", "pk").sql(),
            Ok("ALTER TABLE `users` DROP PRIMARY KEY")
        );
        assert_eq!(
            b.drop_foreign_key("users", "fk").sql(),
            Ok("ALTER TABLE `users` DROP FOREIGN KEY `fk`")
        );
    }

    #[test]
    fn postgresql_ddl() {
        let b = StatementBuilder::for_flavor(Flavor::PostgreSQL);
        assert_eq!(
            b.rename_table("usersOld", "usersNew").sql(),
            Ok(r#"ALTER TABLE "usersOld" RENAME TO "usersNew""#)
        );
        assert_eq!(
            b.alter_column("users", "name", "int").sql(),
            Ok(r#"ALTER TABLE "users" ALTER COLUMN "name" TYPE int"#)
        );
        assert_eq!(
            b.add_primary_key("users", "pk", &["id1", "id2"]).sql(),
            Ok(r#"ALTER TABLE "users" ADD CONSTRAINT "pk" PRIMARY KEY ("id1", "id2")"#)
        );
        assert_eq!(
            b.drop_primary_key("users", "pk").sql(),
            Ok(r#"ALTER TABLE "users" DROP CONSTRAINT "pk""#)
        );
        assert_eq!(
            b.add_foreign_key(
                "users",
                "fk",
                &["p1", "p2"],
                &["f1", "f2"],
                "profile",
                &["ON UPDATE CASCADE"]
            )
            .sql(),
            Ok(concat!(
                r#"ALTER TABLE "users" ADD CONSTRAINT "fk" FOREIGN KEY ("p1", "p2") "#,
                r#"REFERENCES "profile" ("f1", "f2") ON UPDATE CASCADE"#
            ))
        );
        assert_eq!(b.drop_index("users", "idx").sql(), Ok(r#"DROP INDEX "idx""#));
    }

    #[test]
    fn sqlserver_ddl() {
        let b = StatementBuilder::for_flavor(Flavor::SQLServer);
        assert_eq!(
            b.rename_table("usersOld", "usersNew").sql(),
            Ok("EXEC sp_rename 'usersOld', 'usersNew'")
        );
        assert_eq!(
            b.rename_column("users", "name", "nick").sql(),
            Ok("EXEC sp_rename 'users.name', 'nick', 'COLUMN'")
        );
        assert_eq!(
            b.alter_column("users", "name", "int").sql(),
            Ok("ALTER TABLE [users] ALTER COLUMN [name] int")
        );
        assert_eq!(
            b.drop_index("users", "idx").sql(),
            Ok("DROP INDEX [idx] ON [users]")
        );
    }

    #[test]
    fn sp_rename_escapes_single_quotes() {
        let b = StatementBuilder::for_flavor(Flavor::SQLServer);
        assert_eq!(
            b.rename_table("o'ld", "new's").sql(),
            Ok("EXEC sp_rename 'o''ld', 'new''s'")
        );
        assert_eq!(
            b.rename_column("user's", "na'me", "nick").sql(),
            Ok("EXEC sp_rename 'user''s.na''me', 'nick', 'COLUMN'")
        );
    }

    #[test]
    fn oracle_alter_column_uses_modify() {
        let b = StatementBuilder::for_flavor(Flavor::Oracle);
        assert_eq!(
            b.alter_column("users", "name", "int").sql(),
            Ok(r#"ALTER TABLE "users" MODIFY "name" int"#)
        );
    }

    #[test]
    fn create_and_drop_table() {
        let b = sqlite();
        let q = b.create_table(
            "users",
            &[("name", "varchar(255)"), ("id", "int primary key")],
            &["WITHOUT ROWID"],
        );
        assert_eq!(
            q.sql(),
            Ok("CREATE TABLE `users` (`id` int primary key, `name` varchar(255)) WITHOUT ROWID")
        );
        assert_eq!(b.drop_table("users").sql(), Ok("DROP TABLE `users`"));
    }

    #[test]
    fn column_and_index_ddl() {
        let b = sqlite();
        assert_eq!(
            b.add_column("users", "age", "int").sql(),
            Ok("ALTER TABLE `users` ADD `age` int")
        );
        assert_eq!(
            b.create_index("users", "idx", &["name", "age"]).sql(),
            Ok("CREATE INDEX `idx` ON `users` (`name`, `age`)")
        );
        assert_eq!(
            b.create_unique_index("users", "uidx", &["email"]).sql(),
            Ok("CREATE UNIQUE INDEX `uidx` ON `users` (`email`)")
        );
    }

    #[test]
    fn custom_dialect_is_driven_by_capabilities() {
        let dialect = Dialect {
            name: "Tiny",
            quote_open: '"',
            quote_close: '"',
            capabilities: Capabilities {
                truncate: true,
                drop_index_requires_table: true,
                ..Dialect::SQLITE.capabilities
            },
        };
        let b = StatementBuilder::with_dialect(dialect);
        assert_eq!(b.truncate_table("t").sql(), Ok(r#"TRUNCATE TABLE "t""#));
        assert_eq!(b.drop_index("t", "i").sql(), Ok(r#"DROP INDEX "i" ON "t""#));
        assert_eq!(
            b.drop_foreign_key("t", "fk").last_error(),
            Some(&BuildError::Unsupported {
                operation: "DropForeignKey",
                dialect: "Tiny",
            })
        );
    }

    #[test]
    fn new_query_is_ready() {
        let q = sqlite().new_query("SELECT 1");
        assert_eq!(q.sql(), Ok("SELECT 1"));
        assert!(q.params().is_empty());
    }
}
