use crate::prelude::{println, *};
use crate::session;
use colored::Colorize;
use n360_core::news::{
    transform_article_page, DbArticle, ListFilter, ListOutput, ListQuery, SpringPage,
};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
    n360 news list
    n360 news list --query elecciones
    n360 news list --from 2025-01-01 --to 2025-02-01
    n360 news list --category Deportes --category Mundo --page 2")]
pub struct ListOptions {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of articles per page
    #[arg(short, long, default_value = "6")]
    pub size: usize,

    /// Free-text search (takes precedence over other filters)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Start date (YYYY-MM-DD); only applied together with --to
    #[arg(long)]
    pub from: Option<String>,

    /// End date (YYYY-MM-DD); only applied together with --from
    #[arg(long)]
    pub to: Option<String>,

    /// Filter by category (can be repeated)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Fetching articles (page {})...", options.page);
    }

    let filter = ListFilter {
        query: options.query.clone(),
        from: options.from.clone(),
        to: options.to.clone(),
        categories: options.categories.clone(),
    };

    let output = list_articles_data(&filter, options.page, options.size, &global).await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_list_text(&output).trim_end());
    }

    Ok(())
}

/// Fetch one page of articles, routed to the endpoint the filter
/// projects to, and return the transformed list output.
pub async fn list_articles_data(
    filter: &ListFilter,
    page: usize,
    size: usize,
    global: &crate::Global,
) -> Result<ListOutput> {
    let config = crate::config::resolve(global)?;
    let client = session::create_portal_client(None)?;
    let base_url = config.base_url();

    // The backend pages are 0-indexed; the CLI is 1-indexed.
    let backend_page = page.saturating_sub(1).to_string();
    let size_param = size.to_string();

    let request = match filter.project() {
        ListQuery::Search(q) => client
            .get(format!("{base_url}/articulos/buscar"))
            .query(&[
                ("q", q.as_str()),
                ("page", backend_page.as_str()),
                ("size", size_param.as_str()),
            ]),
        ListQuery::DateRange(from, to) => client
            .get(format!("{base_url}/articulos/por-fechas"))
            .query(&[
                ("desde", from.as_str()),
                ("hasta", to.as_str()),
                ("page", backend_page.as_str()),
                ("size", size_param.as_str()),
            ]),
        ListQuery::Categories(categories) => {
            let joined = categories.join(",");
            client
                .get(format!("{base_url}/articulos/por-categorias"))
                .query(&[
                    ("categorias", joined.as_str()),
                    ("page", backend_page.as_str()),
                    ("size", size_param.as_str()),
                ])
        }
        ListQuery::Default => client.get(format!("{base_url}/articulos")).query(&[
            ("page", backend_page.as_str()),
            ("size", size_param.as_str()),
        ]),
    };

    let response = request
        .send()
        .await
        .map_err(|e| eyre!("Failed to fetch articles: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(eyre!("Failed to fetch articles [{}]: {}", status, body));
    }

    let page: SpringPage<DbArticle> = response
        .json()
        .await
        .map_err(|e| eyre!("Failed to parse article page: {}", e))?;

    Ok(transform_article_page(page))
}

/// Convert list output to formatted text with colors
fn format_list_text(output: &ListOutput) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!(
            "NOTICIAS360 (Page {} of {})",
            pagination.current_page, pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.items.is_empty() {
        result.push_str(&format!("\n{}\n", "No articles on this page.".yellow()));
    } else {
        for article in &output.items {
            result.push_str(&format!(
                "\n{} {}\n",
                format!("[{}]", article.id).yellow().bold(),
                article.title.white().bold()
            ));

            result.push_str(&format!(
                "    {}: {} | {}: {}\n",
                "By".green(),
                article
                    .author
                    .as_deref()
                    .unwrap_or("unknown")
                    .bright_white(),
                "Published".green(),
                n360_core::news::format_published(&article.published_at).bright_black()
            ));

            if !article.categories.is_empty() {
                result.push_str(&format!(
                    "    {}: {}\n",
                    "Categories".green(),
                    article.categories.join(", ").bright_magenta()
                ));
            }

            if !article.summary.is_empty() {
                result.push_str(&format!("    {}\n", article.summary));
            }

            result.push_str(&format!(
                "    {}: {}\n",
                "Read".green(),
                format!("n360 news read {}", article.id).cyan()
            ));
        }
    }

    // Navigation section
    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!(
        "{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "total articles".bright_white()
    ));

    if pagination.total_pages > 1 {
        let window = n360_core::pagination::page_window(
            pagination.total_pages,
            pagination.current_page.saturating_sub(1),
        );
        let pages: Vec<String> = window
            .iter()
            .map(|p| {
                let display = p + 1;
                if display == pagination.current_page {
                    format!("[{display}]").bright_cyan().bold().to_string()
                } else {
                    display.to_string()
                }
            })
            .collect();
        result.push_str(&format!("  {}: {}\n", "Pages".green(), pages.join(" ")));
    }

    if let Some(next) = &pagination.next_page_command {
        result.push_str(&format!("  {}: {}\n", "Next page".green(), next.cyan()));
    }
    if let Some(prev) = &pagination.prev_page_command {
        result.push_str(&format!(
            "  {}: {}\n",
            "Previous page".green(),
            prev.cyan()
        ));
    }

    result
}
