use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};

use crate::models::{Product, ValidatedProduct};

/// Sea-ORM entity for the `productos` table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "nombre")]
    pub name: String,
    #[sea_orm(column_name = "descripcion", column_type = "Text")]
    pub description: String,
    #[sea_orm(column_name = "cantidad")]
    pub quantity: i32,
    #[sea_orm(column_name = "precio", column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            quantity: model.quantity,
            price: model.price,
        }
    }
}

impl ActiveModel {
    /// Insert model; the id is assigned by the sequence.
    pub fn for_insert(product: ValidatedProduct) -> Self {
        Self {
            id: NotSet,
            name: Set(product.name),
            description: Set(product.description),
            quantity: Set(product.quantity),
            price: Set(product.price),
        }
    }

    /// Full replacement of every mutable column of row `id`.
    pub fn for_update(id: i64, product: ValidatedProduct) -> Self {
        Self {
            id: Set(id),
            ..Self::for_insert(product)
        }
    }
}
