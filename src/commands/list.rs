//! List posts from the CMS

use anyhow::Result;

use crate::helpers;
use crate::Octavo;

/// List all posts the CMS currently serves
pub async fn run(octavo: &Octavo) -> Result<()> {
    let client = octavo.cms_client()?;
    let posts = super::generate::fetch_post_list(&client, octavo).await?;

    println!("Posts ({}):", posts.len());
    for post in posts {
        let date = post
            .first_publication_date
            .as_deref()
            .map(|d| helpers::date::format_date(d, &octavo.config.date_format))
            .unwrap_or_else(|| "unpublished".to_string());

        println!("  {} - {} [{}]", date, post.data.title, post.uid);
    }

    Ok(())
}
