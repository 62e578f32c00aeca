//! Blog, FAQ, buying guides, contact and static information pages.

use std::sync::OnceLock;

use dental_content::{buying_guides, faq_section, faq_sections, guide, BlogService, FaqSection};
use dental_router::{view_to_url, ContentPage, View};
use leptos::prelude::*;

use super::{error_message, NotFound};
use crate::api::SendContactEmail;

fn blog() -> &'static BlogService {
    static BLOG: OnceLock<BlogService> = OnceLock::new();
    BLOG.get_or_init(BlogService::bundled)
}

fn paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Blog
// ============================================================================

#[component]
pub fn BlogPage() -> impl IntoView {
    view! {
        <h2>{View::Blog.title()}</h2>
        <div class="posts">
            {blog().all_posts().iter().map(|post| {
                let href = view_to_url(&View::blog_post(post.id.as_str()));
                view! {
                    <article class="post-card">
                        <p class="date">{post.display_date()}</p>
                        <h3><a href=href.clone()>{post.title.clone()}</a></h3>
                        <p>{post.summary().to_string()}</p>
                        <a href=href>"Read more"</a>
                    </article>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn BlogPostPage(post_id: String) -> impl IntoView {
    let Some(post) = blog().get_blog_post(&post_id) else {
        return view! { <NotFound message="Blog post not found"/> }.into_any();
    };
    let related = blog().related(&post_id, 3);

    view! {
        <article class="post">
            <a href=view_to_url(&View::Blog) class="breadcrumb">"Blog"</a>
            <h1>{post.title.clone()}</h1>
            <p class="date">
                {post.display_date()}
                {post.author.clone().map(|author| format!(" · {}", author))}
            </p>
            {paragraphs(post.body()).into_iter().map(|p| view! { <p>{p}</p> }).collect::<Vec<_>>()}
            {(!post.tags.is_empty()).then(|| view! {
                <p class="tags">{post.tags.join(", ")}</p>
            })}
        </article>
        {(!related.is_empty()).then(|| view! {
            <aside class="related">
                <h3>"Related posts"</h3>
                <ul>
                    {related.into_iter().map(|other| view! {
                        <li><a href=view_to_url(&View::blog_post(other.id.as_str()))>{other.title.clone()}</a></li>
                    }).collect::<Vec<_>>()}
                </ul>
            </aside>
        })}
    }
    .into_any()
}

// ============================================================================
// FAQ
// ============================================================================

/// Sections to show: the requested one, or all when none or unknown.
fn visible_sections(category: Option<&str>) -> Vec<FaqSection> {
    category
        .and_then(faq_section)
        .map(|section| vec![section])
        .unwrap_or_else(faq_sections)
}

#[component]
pub fn FaqPage(category: Option<String>) -> impl IntoView {
    let selected = category.clone();
    let sections = visible_sections(category.as_deref());
    let all = View::Faq { category: None };

    view! {
        <h2>{all.title()}</h2>
        <nav class="faq-sections">
            <a href=view_to_url(&all) class:active=selected.is_none()>"All"</a>
            {faq_sections().into_iter().map(|section| {
                let active = selected.as_deref() == Some(section.slug);
                view! { <a href=view_to_url(&section.view()) class:active=active>{section.title}</a> }
            }).collect::<Vec<_>>()}
        </nav>
        {sections.into_iter().map(|section| view! {
            <section class="faq-section">
                <h3>{section.title}</h3>
                <dl>
                    {section.entries.into_iter().map(|entry| view! {
                        <dt>{entry.question}</dt>
                        <dd>{entry.answer}</dd>
                    }).collect::<Vec<_>>()}
                </dl>
            </section>
        }).collect::<Vec<_>>()}
    }
}

// ============================================================================
// Buying Guides
// ============================================================================

#[component]
pub fn BuyingGuidesPage() -> impl IntoView {
    view! {
        <h2>{View::BuyingGuides.title()}</h2>
        <div class="guides">
            {buying_guides().into_iter().map(|g| view! {
                <article class="guide-card">
                    <h3><a href=view_to_url(&g.view())>{g.title}</a></h3>
                    <p>{g.summary}</p>
                    <a href=view_to_url(&g.shop_view())>{format!("Shop {}", g.category)}</a>
                </article>
            }).collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn BuyingGuidePage(slug: String) -> impl IntoView {
    let Some(g) = guide(&slug) else {
        return view! { <NotFound message="Buying guide not found"/> }.into_any();
    };
    let shop = view_to_url(&g.shop_view());

    view! {
        <article class="guide">
            <a href=view_to_url(&View::BuyingGuides) class="breadcrumb">"Buying Guides"</a>
            <h1>{g.title}</h1>
            <p class="summary">{g.summary}</p>
            {g.sections.into_iter().map(|section| view! {
                <h3>{section.heading}</h3>
                <p>{section.body}</p>
            }).collect::<Vec<_>>()}
            <a href=shop class="btn">{format!("Shop {}", g.category)}</a>
        </article>
    }
    .into_any()
}

// ============================================================================
// Contact
// ============================================================================

#[component]
pub fn ContactPage() -> impl IntoView {
    let send_action = ServerAction::<SendContactEmail>::new();
    let pending = send_action.pending();
    let value = send_action.value();

    view! {
        <h2>{View::Contact.title()}</h2>
        <p>"Questions about equipment, orders or service? Send us a message."</p>
        <ActionForm action=send_action>
            <div class="form">
                <label>"Name" <input type="text" name="name" required/></label>
                <label>"Email" <input type="email" name="email" required/></label>
                <label>"Subject" <input type="text" name="subject" required/></label>
                <label>"Message" <textarea name="message" rows="6" required></textarea></label>
                <button type="submit" class="btn" disabled=move || pending.get()>
                    {move || if pending.get() { "Sending..." } else { "Send Message" }}
                </button>
            </div>
        </ActionForm>
        {move || value.get().map(|result| match result {
            Ok(message) => view! {
                <p style="color: green; margin-top: 0.5rem;">{message}</p>
            }.into_any(),
            Err(e) => view! {
                <p style="color: red; margin-top: 0.5rem;">{error_message(&e)}</p>
            }.into_any(),
        })}
    }
}

// ============================================================================
// Information Pages
// ============================================================================

fn blurb(page: ContentPage) -> &'static str {
    match page {
        ContentPage::About => "We supply dental practices with equipment, imaging and everyday consumables.",
        ContentPage::ShippingPolicy => "Standard shipping is free on every order. Large equipment ships by freight with a delivery appointment.",
        ContentPage::ReturnPolicy => "Unopened supplies may be returned within 30 days. Equipment returns require authorization.",
        ContentPage::PrivacyPolicy => "We only use your information to process orders and answer your questions.",
        ContentPage::TermsOfService => "Orders are subject to availability and confirmation of payment.",
        ContentPage::Warranty => "Equipment carries the manufacturer's warranty. We help coordinate service claims.",
        ContentPage::Financing => "Equipment financing is available for qualifying practices.",
        ContentPage::Showroom => "Visit our showroom to try chairs, lights and imaging systems before you buy.",
        ContentPage::Careers => "We're always looking for people who care about dentistry and service.",
        ContentPage::Accessibility => "We aim to make this site usable for everyone. Let us know if something gets in your way.",
    }
}

#[component]
pub fn InfoPage(page: ContentPage) -> impl IntoView {
    view! {
        <article class="info-page">
            <h1>{page.title()}</h1>
            <p>{blurb(page)}</p>
            <p>
                "Questions? "
                <a href=view_to_url(&View::Contact)>"Contact us"</a>
            </p>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs() {
        assert_eq!(paragraphs("One.\n\n  Two.  \n\n\n"), vec!["One.", "Two."]);
        assert!(paragraphs("").is_empty());
    }

    #[test]
    fn test_visible_sections() {
        let all = faq_sections().len();
        assert_eq!(visible_sections(None).len(), all);
        assert_eq!(visible_sections(Some("nope")).len(), all);

        let shipping = visible_sections(Some("shipping"));
        assert_eq!(shipping.len(), 1);
        assert_eq!(shipping[0].slug, "shipping");
    }

    #[test]
    fn test_bundled_blog_posts_resolve() {
        for post in blog().all_posts() {
            assert!(blog().get_blog_post(&post.id).is_some());
        }
        assert!(blog().get_blog_post("unknown-post").is_none());
    }
}
