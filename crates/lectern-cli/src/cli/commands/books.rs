use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use lectern_core::api::books::{BookPatch, MutationCoordinator};
use lectern_core::api::catalog::{CatalogClient, OwnedCatalog};
use lectern_core::api::ApiClient;
use lectern_core::catalog::CatalogSnapshot;
use lectern_core::forms::{BookForm, FileAttachment};
use lectern_core::session::SessionStore;
use lectern_types::Book;

use super::require_session;

/// Fields for `books add`, collected by the argument parser.
pub struct AddArgs {
    pub title: String,
    pub author_id: String,
    pub category_id: String,
    pub description: String,
    pub image_url: String,
    pub file: String,
}

pub async fn list(api: &ApiClient) -> Result<()> {
    let books = CatalogClient::new(api).load_catalog().await?;
    print_books(&books, "The catalog is empty.");
    Ok(())
}

pub async fn mine(api: &ApiClient, store: &SessionStore) -> Result<()> {
    match CatalogClient::new(api)
        .load_owned_catalog(store.get())
        .await?
    {
        OwnedCatalog::MustLogIn => {
            println!("You must log in to see your books; run `lectern login` first.");
        }
        OwnedCatalog::Books(books) => print_books(&books, "You have not uploaded any books yet."),
    }
    Ok(())
}

pub async fn add(api: &ApiClient, store: &SessionStore, args: AddArgs) -> Result<()> {
    let session = require_session(store)?;
    let file = read_attachment(&args.file).await?;

    let mut form = BookForm {
        title: args.title,
        author_id: args.author_id,
        category_id: args.category_id,
        description: args.description,
        image_url: args.image_url,
        file: Some(file),
    };
    let mut snapshot = CatalogSnapshot::new(CatalogClient::new(api).load_catalog().await?);

    let book = MutationCoordinator::new(api)
        .create_book(session, &mut form, &mut snapshot)
        .await?;
    println!(
        "Created \"{}\" ({}); the catalog now has {} books.",
        book.title,
        book.id,
        snapshot.len()
    );
    Ok(())
}

pub async fn edit(
    api: &ApiClient,
    store: &SessionStore,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
    file: Option<String>,
) -> Result<()> {
    let session = require_session(store)?;

    let books = CatalogClient::new(api).load_catalog().await?;
    let current = books
        .iter()
        .find(|b| b.id == id)
        .with_context(|| format!("No book with id {id} in the catalog"))?;

    // Unset fields keep the book's current values.
    let patch = BookPatch {
        title: title.unwrap_or_else(|| current.title.clone()),
        description: description.unwrap_or_else(|| current.description.clone()),
        image_url: image.unwrap_or_else(|| current.image_url.clone()),
    };
    let attachment = match file {
        Some(path) => Some(read_attachment(&path).await?),
        None => None,
    };

    let mut snapshot = CatalogSnapshot::new(books);
    let book = MutationCoordinator::new(api)
        .update_book(session, id, &patch, attachment.as_ref(), &mut snapshot)
        .await?;
    println!("Updated \"{}\" ({}).", book.title, book.id);
    Ok(())
}

pub async fn rm(api: &ApiClient, store: &SessionStore, id: &str, yes: bool) -> Result<()> {
    let session = require_session(store)?;

    if !yes && !confirm(&format!("Delete book {id}? This cannot be undone."))? {
        println!("Aborted.");
        return Ok(());
    }

    let mut snapshot = CatalogSnapshot::new(CatalogClient::new(api).load_catalog().await?);
    MutationCoordinator::new(api)
        .delete_book(session, id, &mut snapshot)
        .await?;
    println!("Deleted {id}; {} books remain.", snapshot.len());
    Ok(())
}

fn print_books(books: &[Book], empty_message: &str) {
    if books.is_empty() {
        println!("{empty_message}");
        return;
    }
    for book in books {
        println!("{}  {}", book.id, book.title);
        if !book.description.is_empty() {
            println!("    {}", book.description);
        }
    }
    println!("{} books.", books.len());
}

async fn read_attachment(path: &str) -> Result<FileAttachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read PDF from {path}"))?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.pdf")
        .to_string();
    Ok(FileAttachment::new(file_name, bytes))
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush().context("flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
