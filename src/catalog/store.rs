//! JSON-file backed catalog store.
//!
//! The catalog keeps books in insertion order and rewrites the whole file after each
//! mutation. A file that is missing or cannot be parsed is treated as an empty catalog;
//! failures while saving are returned to the caller and the in-memory change is undone.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::books::dto::BookUpdate;
use crate::core::library::{LibraryError, LibraryResult};

#[derive(Debug)]
pub struct Catalog {
    path: Option<PathBuf>,
    books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub name: String,
    pub book_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_books: usize,
    pub unique_authors: usize,
    pub top_author: Option<AuthorCount>,
    pub authors: BTreeMap<String, usize>,
    pub filename: Option<String>,
    pub file_exists: bool,
}

impl Catalog {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let books = match load_books(&path) {
            Ok(books) => books,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "catalog file unreadable, starting empty");
                vec![]
            }
        };
        tracing::info!(path = %path.display(), books = books.len(), "catalog loaded");
        Self { path: Some(path), books }
    }

    pub fn in_memory() -> Self {
        Self { path: None, books: vec![] }
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn add(&mut self, book: Book) -> LibraryResult<()> {
        book.validate()?;
        if self.find(book.isbn.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(
                format!("isbn {} already exists", book.isbn).as_str()));
        }
        self.books.push(book);
        if let Err(err) = self.save() {
            self.books.pop();
            return Err(err);
        }
        Ok(())
    }

    pub fn find(&self, isbn: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.isbn == isbn)
    }

    pub fn remove(&mut self, isbn: &str) -> LibraryResult<Book> {
        let pos = self.position(isbn)?;
        let removed = self.books.remove(pos);
        if let Err(err) = self.save() {
            self.books.insert(pos, removed);
            return Err(err);
        }
        Ok(removed)
    }

    pub fn update(&mut self, isbn: &str, patch: &BookUpdate) -> LibraryResult<Book> {
        let patch = patch.validate()?;
        let pos = self.position(isbn)?;
        if let Some(new_isbn) = patch.isbn.as_deref() {
            if new_isbn != isbn && self.find(new_isbn).is_some() {
                return Err(LibraryError::duplicate_key(
                    format!("isbn {} already exists", new_isbn).as_str()));
            }
        }
        let updated = patch.apply(&self.books[pos]);
        let previous = std::mem::replace(&mut self.books[pos], updated.clone());
        if let Err(err) = self.save() {
            self.books[pos] = previous;
            return Err(err);
        }
        Ok(updated)
    }

    pub fn search(&self, term: &str) -> Vec<Book> {
        let needle = term.to_lowercase();
        self.books.iter().filter(|b| b.matches(needle.as_str())).cloned().collect()
    }

    pub fn list_all(&self) -> Vec<Book> {
        self.books.clone()
    }

    pub fn stats(&self) -> CatalogStats {
        // first-seen order decides ties for the top author
        let mut ordered: Vec<AuthorCount> = vec![];
        for book in &self.books {
            match ordered.iter_mut().find(|a| a.name == book.author) {
                Some(entry) => entry.book_count += 1,
                None => ordered.push(AuthorCount { name: book.author.clone(), book_count: 1 }),
            }
        }
        let mut top_author: Option<&AuthorCount> = None;
        for entry in &ordered {
            if top_author.map_or(true, |top| entry.book_count > top.book_count) {
                top_author = Some(entry);
            }
        }
        CatalogStats {
            total_books: self.books.len(),
            unique_authors: ordered.len(),
            top_author: top_author.cloned(),
            authors: ordered.iter().map(|a| (a.name.clone(), a.book_count)).collect(),
            filename: self.path.as_ref().map(|p| p.display().to_string()),
            file_exists: self.path.as_ref().map_or(false, |p| p.exists()),
        }
    }

    /// Rewrites the backing file; a no-op for in-memory catalogs.
    pub fn save(&self) -> LibraryResult<()> {
        let path = match self.path.as_ref() {
            Some(path) => path,
            None => return Ok(()),
        };
        let json = serde_json::to_vec_pretty(&self.books)?;
        let tmp = tmp_path(path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), books = self.books.len(), "catalog saved");
        Ok(())
    }

    fn position(&self, isbn: &str) -> LibraryResult<usize> {
        self.books.iter().position(|b| b.isbn == isbn)
            .ok_or_else(|| LibraryError::not_found(format!("book not found for {}", isbn).as_str()))
    }
}

fn load_books(path: &Path) -> LibraryResult<Vec<Book>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let data = fs::read(path)?;
    let loaded: Vec<Book> = serde_json::from_slice(&data)?;
    let mut books: Vec<Book> = Vec::with_capacity(loaded.len());
    for book in loaded {
        if books.iter().any(|b| b.isbn == book.isbn) {
            tracing::warn!(isbn = %book.isbn, "skipping duplicate isbn in catalog file");
            continue;
        }
        books.push(book);
    }
    Ok(books)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
