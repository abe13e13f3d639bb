use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(
                        big_integer(Productos::Id)
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Productos::Nombre, 100))
                    .col(text(Productos::Descripcion).default(""))
                    .col(integer(Productos::Cantidad).check(Expr::col(Productos::Cantidad).gte(0)))
                    .col(double(Productos::Precio).check(Expr::col(Productos::Precio).gte(0)))
                    .to_owned(),
            )
            .await?;

        // Low stock listing filters and sorts on quantity
        manager
            .create_index(
                Index::create()
                    .name("idx_productos_cantidad")
                    .table(Productos::Table)
                    .col(Productos::Cantidad)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_nombre")
                    .table(Productos::Table)
                    .col(Productos::Nombre)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Productos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    Id,
    Nombre,
    Descripcion,
    Cantidad,
    Precio,
}
