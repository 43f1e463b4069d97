use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use n360_core::content::{extract_lead, format_content};
use n360_core::news::{related_pool, to_article, Article, DbArticle, ListFilter};
use rand::seq::SliceRandom;

const RELATED_POOL_SIZE: usize = 20;
const RELATED_LIMIT: usize = 6;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ReadOptions {
    /// Article ID
    pub id: u64,

    /// Skip the related-articles section
    #[arg(long)]
    pub no_related: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
pub struct ReadOutput {
    pub article: Article,
    pub lead: String,
    pub body_html: String,
    pub related: Vec<Article>,
}

pub async fn run(options: ReadOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching article {}...", options.id);
    }

    let output = read_article_data(options.id, !options.no_related, &global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_formatted(&output);
    }

    Ok(())
}

/// Fetch one article and assemble its rendered detail view
pub async fn read_article_data(
    id: u64,
    with_related: bool,
    global: &crate::Global,
) -> Result<ReadOutput> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;

    let url = format!("{}/articulos/{}", config.base_url(), id);
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch article: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch article {} [{}]: {}", id, status, body));
    }

    let row: DbArticle = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse article response: {}", e))?;
    let article = to_article(row);

    let raw_content = article.content.clone().unwrap_or_default();
    let lead = extract_lead(&n360_core::news::strip_html(&raw_content));

    // Scraped articles arrive as plain text; editor-created ones may
    // already carry markup, which is passed through untouched.
    let body_html = if raw_content.contains('<') {
        raw_content
    } else {
        format_content(&raw_content)
    };

    let related = if with_related {
        fetch_related(&article, global).await?
    } else {
        vec![]
    };

    Ok(ReadOutput {
        article,
        lead,
        body_html,
        related,
    })
}

/// Shuffle articles from the same category (or the front page) into a
/// capped "more news" rail.
async fn fetch_related(article: &Article, global: &crate::Global) -> Result<Vec<Article>> {
    let filter = ListFilter {
        categories: article.categories.first().cloned().into_iter().collect(),
        ..Default::default()
    };

    let page = super::list::list_articles_data(&filter, 1, RELATED_POOL_SIZE, global).await?;

    let mut pool = related_pool(page.items, article.id);
    pool.shuffle(&mut rand::thread_rng());
    pool.truncate(RELATED_LIMIT);

    Ok(pool)
}

fn print_formatted(output: &ReadOutput) {
    let article = &output.article;

    println!("\n{}", "=".repeat(80).bright_cyan());
    println!("{}", article.title.white().bold());
    println!("{}", "=".repeat(80).bright_cyan());

    println!(
        "{}: {} | {}: {}",
        "By".green(),
        article
            .author
            .as_deref()
            .unwrap_or("unknown")
            .bright_white(),
        "Published".green(),
        n360_core::news::format_published(&article.published_at).bright_black()
    );

    if !article.categories.is_empty() {
        println!(
            "{}: {}",
            "Categories".green(),
            article.categories.join(", ").bright_magenta()
        );
    }
    if !article.tags.is_empty() {
        println!("{}: {}", "Tags".green(), article.tags.join(", ").cyan());
    }

    if !output.lead.is_empty() {
        println!("\n{}", output.lead.bright_white().italic());
    }

    if !output.body_html.is_empty() {
        println!("\n{}", output.body_html);
    }

    if !output.related.is_empty() {
        println!("\n{}", "MORE NEWS".bright_yellow().bold());
        for related in &output.related {
            println!(
                "  {} {} ({})",
                format!("[{}]", related.id).yellow(),
                related.title,
                format!("n360 news read {}", related.id).cyan()
            );
        }
    }

    println!();
}
