use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryFilter, Set, Value,
};

use crate::{
    entities::{NamedTable, director, genre},
    error::AppResult,
    models::NamedRecord,
};

type PrimaryKeyOf<E> = <<E as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType;

/// Storage handle shared by every handler. Each mutating call is a single
/// autocommitted statement.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all<E: EntityTrait>(&self) -> AppResult<Vec<E::Model>> {
        Ok(E::find().all(&self.db).await?)
    }

    pub async fn find_by_id<E>(&self, id: i32) -> AppResult<Option<E::Model>>
    where
        E: EntityTrait,
        i32: Into<PrimaryKeyOf<E>>,
    {
        Ok(E::find_by_id(id).one(&self.db).await?)
    }

    /// Rows where every `column = value` predicate holds.
    pub async fn find_by_equality<E: EntityTrait>(
        &self,
        predicates: Vec<(E::Column, Value)>,
    ) -> AppResult<Vec<E::Model>> {
        let mut query = E::find();
        for (column, value) in predicates {
            query = query.filter(column.eq(value));
        }
        Ok(query.all(&self.db).await?)
    }

    pub async fn insert<A>(&self, model: A) -> AppResult<PrimaryKeyOf<A::Entity>>
    where
        A: ActiveModelTrait,
    {
        let res = <A::Entity as EntityTrait>::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn update<A>(&self, model: A) -> AppResult<<A::Entity as EntityTrait>::Model>
    where
        A: ActiveModelTrait,
        <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    {
        Ok(<A::Entity as EntityTrait>::update(model).exec(&self.db).await?)
    }

    /// Returns the number of rows removed.
    pub async fn delete_by_id<E>(&self, id: i32) -> AppResult<u64>
    where
        E: EntityTrait,
        i32: Into<PrimaryKeyOf<E>>,
    {
        let res = E::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected)
    }

    pub async fn find_named(&self, table: NamedTable, id: i32) -> AppResult<Option<NamedRecord>> {
        let record = match table {
            NamedTable::Genre => self.find_by_id::<genre::Entity>(id).await?.map(NamedRecord::from),
            NamedTable::Director => {
                self.find_by_id::<director::Entity>(id).await?.map(NamedRecord::from)
            },
        };
        Ok(record)
    }

    pub async fn insert_named(
        &self,
        table: NamedTable,
        id: i32,
        name: Option<String>,
    ) -> AppResult<()> {
        match table {
            NamedTable::Genre => {
                let model = genre::ActiveModel { id: Set(id), name: Set(name) };
                self.insert(model).await?;
            },
            NamedTable::Director => {
                let model = director::ActiveModel { id: Set(id), name: Set(name) };
                self.insert(model).await?;
            },
        }
        Ok(())
    }

    /// Overwrites the name of an existing row. Returns `false` when no row has `id`.
    pub async fn rename_named(
        &self,
        table: NamedTable,
        id: i32,
        name: Option<String>,
    ) -> AppResult<bool> {
        match table {
            NamedTable::Genre => {
                let Some(row) = self.find_by_id::<genre::Entity>(id).await? else {
                    return Ok(false);
                };
                let mut model: genre::ActiveModel = row.into();
                model.name = Set(name);
                self.update(model).await?;
            },
            NamedTable::Director => {
                let Some(row) = self.find_by_id::<director::Entity>(id).await? else {
                    return Ok(false);
                };
                let mut model: director::ActiveModel = row.into();
                model.name = Set(name);
                self.update(model).await?;
            },
        }
        Ok(true)
    }

    /// Returns `false` when no row has `id`.
    pub async fn delete_named(&self, table: NamedTable, id: i32) -> AppResult<bool> {
        let removed = match table {
            NamedTable::Genre => self.delete_by_id::<genre::Entity>(id).await?,
            NamedTable::Director => self.delete_by_id::<director::Entity>(id).await?,
        };
        Ok(removed > 0)
    }
}
