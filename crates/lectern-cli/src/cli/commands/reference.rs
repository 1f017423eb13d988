use anyhow::Result;
use lectern_core::api::catalog::CatalogClient;
use lectern_core::api::ApiClient;

pub async fn authors(api: &ApiClient) -> Result<()> {
    let data = CatalogClient::new(api).load_reference_data().await;
    if data.authors.is_empty() {
        println!("No authors available.");
        return Ok(());
    }
    for author in &data.authors {
        println!("{}  {}", author.id, author.name);
    }
    Ok(())
}

pub async fn categories(api: &ApiClient) -> Result<()> {
    let data = CatalogClient::new(api).load_reference_data().await;
    if data.categories.is_empty() {
        println!("No categories available.");
        return Ok(());
    }
    for category in &data.categories {
        println!("{}  {}", category.id, category.name);
    }
    Ok(())
}
