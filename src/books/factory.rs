use crate::books::repository::BookRepository;
use crate::books::repository::json_book_repository::JsonBookRepository;
use crate::catalog::store::Catalog;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;

pub fn create_book_repository(config: &Configuration) -> Box<dyn BookRepository> {
    match config.store {
        RepositoryStore::JsonFile => {
            Box::new(JsonBookRepository::new(Catalog::open(&config.catalog_path)))
        }
        RepositoryStore::Memory => {
            Box::new(JsonBookRepository::new(Catalog::in_memory()))
        }
    }
}
