//! Blog commands.

use anyhow::{bail, Context as _, Result};
use chrono::NaiveDate;
use dental_content::{BlogPost, BlogService};
use dental_router::{view_to_url, View};

use super::{BlogArgs, BlogCommand};
use crate::context::Context;

/// Run the blog command.
pub async fn run(args: BlogArgs, ctx: &Context) -> Result<()> {
    let service = match &args.posts {
        Some(path) => {
            let path = ctx.resolve_path(path);
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read posts file: {}", path.display()))?;
            BlogService::from_json(&text)
                .with_context(|| format!("Failed to parse posts file: {}", path.display()))?
        }
        None => BlogService::bundled(),
    };

    match args.command {
        BlogCommand::List { tag, since, limit } => {
            let since = since.as_deref().map(parse_date).transpose()?;
            let posts = select(&service, tag.as_deref(), since, limit);
            list_posts(ctx, &posts)
        }
        BlogCommand::Show { id } => show_post(ctx, &service, &id),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", value))
}

fn select<'a>(
    service: &'a BlogService,
    tag: Option<&str>,
    since: Option<NaiveDate>,
    limit: Option<usize>,
) -> Vec<&'a BlogPost> {
    let posts: Vec<&BlogPost> = match tag {
        Some(tag) => service.with_tag(tag),
        None => service.all_posts().iter().collect(),
    };
    posts
        .into_iter()
        .filter(|p| since.map_or(true, |d| p.date >= d))
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

fn list_posts(ctx: &Context, posts: &[&BlogPost]) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&posts);
        return Ok(());
    }

    ctx.output.header(&View::Blog.title());
    if posts.is_empty() {
        ctx.output.info("No posts found.");
        return Ok(());
    }
    for post in posts {
        ctx.output.list_item(&format!("{}  {}", post.display_date(), post.title));
        ctx.output
            .kv("url", &view_to_url(&View::blog_post(post.id.as_str())));
    }
    Ok(())
}

fn show_post(ctx: &Context, service: &BlogService, id: &str) -> Result<()> {
    let Some(post) = service.get_blog_post(id) else {
        bail!("Blog post '{}' not found", id);
    };

    if ctx.output.is_json() {
        ctx.output.json(post);
        return Ok(());
    }

    ctx.output.header(&post.title);
    ctx.output.kv("date", &post.display_date());
    if let Some(author) = &post.author {
        ctx.output.kv("author", author);
    }
    if !post.tags.is_empty() {
        ctx.output.kv("tags", &post.tags.join(", "));
    }
    ctx.output.info("");
    println!("{}", post.body());

    let related = service.related(id, 3);
    if !related.is_empty() {
        ctx.output.header("Related posts");
        for other in related {
            ctx.output.list_item(&other.title);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_filters() {
        let service = BlogService::bundled();
        let all = select(&service, None, None, None);
        assert_eq!(all.len(), service.len());

        let since = parse_date("2024-07-01").unwrap();
        let recent = select(&service, None, Some(since), None);
        assert!(recent.iter().all(|p| p.date >= since));
        assert!(recent.len() < all.len());

        assert_eq!(select(&service, None, None, Some(2)).len(), 2);
        assert!(select(&service, Some("no-such-tag"), None, None).is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-09-12").is_ok());
        assert!(parse_date("12/09/2024").is_err());
    }
}
