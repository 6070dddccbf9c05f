//! Binds a descriptor to the backend: list, show, create, update and delete over its `be_url`.

use super::client::{AdminClient, ClientError};
use super::descriptor::{EntityDescriptor, Table};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub struct EntityFactory;

impl EntityFactory {
    pub fn get_entity<T>(descriptor: EntityDescriptor<T>, client: AdminClient) -> EntityHandle<T>
    where
        T: Serialize + DeserializeOwned,
    {
        EntityHandle { descriptor, client }
    }
}

pub struct EntityHandle<T> {
    descriptor: EntityDescriptor<T>,
    client: AdminClient,
}

impl<T> EntityHandle<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn descriptor(&self) -> &EntityDescriptor<T> {
        &self.descriptor
    }

    /// GET `{be}/all`
    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        self.client.get(&format!("{}/all", self.descriptor.be_url)).await
    }

    /// GET `{be}/{id}`
    pub async fn show(&self, id: Uuid) -> Result<Option<T>, ClientError> {
        self.client.get(&format!("{}/{}", self.descriptor.be_url, id)).await
    }

    /// POST `{be}`
    pub async fn create<I: Serialize + ?Sized>(&self, input: &I) -> Result<T, ClientError> {
        self.client.post(self.descriptor.be_url, input).await
    }

    /// PATCH `{be}/{id}`
    pub async fn update<I: Serialize + ?Sized>(&self, id: Uuid, input: &I) -> Result<T, ClientError> {
        self.client.patch(&format!("{}/{}", self.descriptor.be_url, id), input).await
    }

    /// DELETE `{be}/bulk` with a single id.
    pub async fn delete(&self, id: Uuid) -> Result<bool, ClientError> {
        let flags: Vec<bool> = self
            .client
            .delete(&format!("{}/bulk", self.descriptor.be_url), &[id])
            .await?;
        Ok(flags.first().copied().unwrap_or(false))
    }

    pub async fn list_table(&self) -> Result<Table, ClientError> {
        let rows = self.list().await?;
        let values = to_values(&rows)?;
        Ok(Table::new(&self.descriptor.list, &values))
    }

    /// Detail view; no rows when the id is unknown.
    pub async fn show_table(&self, id: Uuid) -> Result<Table, ClientError> {
        let row = self.show(id).await?;
        let values = to_values(row.as_slice())?;
        Ok(Table::new(&self.descriptor.show, &values))
    }

    /// Placeholder rows in the list layout, for rendering before the backend answers.
    pub fn dummy_table(&self) -> Result<Table, ClientError> {
        let values = to_values(&self.descriptor.dummy_data)?;
        Ok(Table::new(&self.descriptor.list, &values))
    }
}

fn to_values<T: Serialize>(rows: &[T]) -> Result<Vec<serde_json::Value>, ClientError> {
    rows.iter()
        .map(|r| serde_json::to_value(r).map_err(|e| ClientError::Decode(e.to_string())))
        .collect()
}
