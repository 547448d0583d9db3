//! 建表迁移

use bistro_adapter_postgres::Migration;

/// 服务的全部迁移，按版本号应用
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration::new(
            1,
            "create_menu_item",
            r#"
            CREATE TABLE IF NOT EXISTS menu_item (
                id SERIAL PRIMARY KEY,
                title VARCHAR NOT NULL,
                price INTEGER NOT NULL,
                description VARCHAR(144) NOT NULL,
                meal VARCHAR NOT NULL,
                "type" VARCHAR NOT NULL,
                img VARCHAR NOT NULL
            )
            "#,
        ),
        Migration::new(
            2,
            "create_cart",
            r#"
            CREATE TABLE IF NOT EXISTS cart (
                id SERIAL PRIMARY KEY,
                title VARCHAR NOT NULL,
                price INTEGER NOT NULL,
                "type" VARCHAR NOT NULL,
                img VARCHAR NOT NULL
            )
            "#,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_unique_and_ordered() {
        let versions: Vec<_> = migrations().iter().map(|m| m.version).collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn test_description_column_is_bounded() {
        let menu = &migrations()[0];
        assert!(menu.up_sql.contains("description VARCHAR(144) NOT NULL"));
    }
}
