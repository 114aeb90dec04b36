use std::str::FromStr;
use async_trait::async_trait;
use crate::core::library::LibraryResult;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> LibraryResult<usize>;

    // replaces the entity stored under id
    async fn update(&self, id: &str, entity: &Entity) -> LibraryResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> LibraryResult<Entity>;

    // delete an entity, returning what was removed
    async fn delete(&self, id: &str) -> LibraryResult<Entity>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepositoryStore {
    JsonFile,
    Memory,
}

impl FromStr for RepositoryStore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" | "file" => Ok(RepositoryStore::JsonFile),
            "memory" => Ok(RepositoryStore::Memory),
            other => Err(format!("unknown repository store {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_parse_store() {
        assert_eq!(Ok(RepositoryStore::JsonFile), "json".parse());
        assert_eq!(Ok(RepositoryStore::JsonFile), "FILE".parse());
        assert_eq!(Ok(RepositoryStore::Memory), "memory".parse());
        assert!("postgres".parse::<RepositoryStore>().is_err());
    }
}
