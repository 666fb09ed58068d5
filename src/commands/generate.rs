//! Generate static files
//!
//! Fetches post documents from the CMS (or reuses the response cache when
//! it is still within the revalidate window), then hands them to the
//! generator for rendering.

use anyhow::Result;

use crate::cache::CacheDb;
use crate::cms::{CmsClient, Predicate, QueryOptions};
use crate::generator::Generator;
use crate::pagination::{PaginationState, Paginator};
use crate::Octavo;

/// Generate the static site
pub async fn run(octavo: &Octavo, force: bool) -> Result<()> {
    let start = std::time::Instant::now();

    let cms = &octavo.config.cms;
    let cache = CacheDb::load(&octavo.base_dir);

    let cache = if !force && cache.is_fresh(cms.revalidate) {
        tracing::info!(
            "Using cached CMS documents ({}s old, revalidate {}s)",
            cache.age_secs(),
            cms.revalidate
        );
        cache
    } else {
        let fresh = fetch_documents(octavo).await?;
        fresh.save(&octavo.base_dir)?;
        fresh
    };

    tracing::info!("Rendering {} posts", cache.documents.len());

    let generator = Generator::new(octavo)?;
    generator.generate(&cache.documents, cache.next_page.as_deref())?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Fetch every post document from the CMS
///
/// Queries the first page, walks the pagination cursor to collect the full
/// post list, then loads each post's full document by uid.
async fn fetch_documents(octavo: &Octavo) -> Result<CacheDb> {
    let cms = &octavo.config.cms;
    let client = octavo.cms_client()?;

    let predicate = Predicate::at("document.type", &cms.document_type);
    let options = QueryOptions {
        page_size: cms.page_size,
    };

    let initial = client.query(&predicate, &options).await?;
    let next_page = initial.next_page.clone();

    let state = PaginationState::from_response(&initial)?;
    let posts = Paginator::new(state, &client).collect_all().await;

    tracing::info!("Found {} posts", posts.len());

    let mut documents = Vec::with_capacity(posts.len());
    for post in &posts {
        documents.push(client.get_by_uid(&cms.document_type, &post.uid).await?);
    }

    Ok(CacheDb::new(documents, next_page))
}

/// Fetch the full post list without rendering, for `octavo list`
pub async fn fetch_post_list(client: &CmsClient, octavo: &Octavo) -> Result<Vec<crate::content::Post>> {
    let cms = &octavo.config.cms;

    let predicate = Predicate::at("document.type", &cms.document_type);
    let options = QueryOptions {
        page_size: cms.page_size,
    };

    let initial = client.query(&predicate, &options).await?;
    let state = PaginationState::from_response(&initial)?;
    Ok(Paginator::new(state, client).collect_all().await)
}
