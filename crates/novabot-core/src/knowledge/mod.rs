//! Static knowledge base: the fact table and the topic catalogue.
//!
//! Everything the assistant can say lives here. Topics are declared in
//! priority order (the matcher returns on first hit), each with its
//! trigger keywords, optional sub-topics, and a reply template. Templates
//! use `{fact.key}` placeholders that are rendered once at construction,
//! so the engine only ever hands out pre-baked strings.
//!
//! The catalogue is built at process start and never mutated afterwards.

use serde::Serialize;
use tracing::warn;

// ── Fact Table ──────────────────────────────────────────────────────

/// Immutable mapping from fact key to display value.
///
/// Values are display-formatted strings (currency, durations) so reply
/// templates stay free of formatting logic.
#[derive(Debug, Clone)]
pub struct FactTable {
    entries: Vec<(&'static str, &'static str)>,
}

impl FactTable {
    /// The facts for the Nova assistant: service-tier pricing,
    /// maintenance plans, and typical delivery timelines.
    pub fn default_facts() -> Self {
        Self {
            entries: vec![
                ("price.simple", "₹25,000"),
                ("price.medium", "₹40,000"),
                ("price.large", "₹55,000"),
                ("maintenance.basic.monthly", "₹1,000/month"),
                ("maintenance.standard.monthly", "₹2,500/month"),
                ("maintenance.premium.monthly", "₹5,000/month"),
                ("timeline.simple", "1-2 weeks"),
                ("timeline.medium", "2-4 weeks"),
                ("timeline.large", "4-8 weeks"),
            ],
        }
    }

    /// Look up a fact by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Number of facts in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render a reply template, substituting `{fact.key}` placeholders.
    ///
    /// Unknown keys are left in place verbatim (and logged) rather than
    /// dropped, so a typo in a template is visible in the output instead
    /// of silently eating text.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    let key = &after[..end];
                    match self.get(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            warn!(key, "Unknown fact key in reply template");
                            out.push('{');
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    // Unclosed brace: emit the tail as-is.
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

// ── Topic Catalogue ─────────────────────────────────────────────────

/// Identifier for a subject the assistant can discuss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopicId {
    Pricing,
    Ai,
    Services,
    Maintenance,
    Timeline,
    TechStack,
    Contact,
    WhyUs,
}

impl TopicId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pricing => "pricing",
            Self::Ai => "ai",
            Self::Services => "services",
            Self::Maintenance => "maintenance",
            Self::Timeline => "timeline",
            Self::TechStack => "tech-stack",
            Self::Contact => "contact",
            Self::WhyUs => "why-us",
        }
    }
}

/// Identifier for a more specific variant within a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubTopicId {
    SimpleSite,
    MediumSite,
    LargeSite,
    MaintenancePlans,
}

impl SubTopicId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleSite => "simple-site",
            Self::MediumSite => "medium-site",
            Self::LargeSite => "large-site",
            Self::MaintenancePlans => "maintenance-plans",
        }
    }
}

/// A sub-topic: its own triggers and a dedicated reply.
#[derive(Debug, Clone)]
pub struct SubTopic {
    pub id: SubTopicId,
    pub triggers: &'static [&'static str],
    pub reply: String,
}

/// A topic: trigger keywords, optional ordered sub-topics, and the
/// generic reply used when no sub-topic matches.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: TopicId,
    pub triggers: &'static [&'static str],
    pub sub_topics: Vec<SubTopic>,
    pub reply: String,
}

/// The fixed menu shown when no topic matches. Never varies.
pub const FALLBACK_REPLY: &str = "Thanks for your question! I can help you with information about:\n\n• Services & pricing\n• AI integration features\n• Maintenance plans\n• Project timelines\n• Technologies used\n\nWhat would you like to know more about? For custom requirements, please use the contact form.";

/// Build the topic catalogue in priority order.
///
/// The order of this list IS the matching priority: pricing first, then
/// AI, services, maintenance, timeline, tech stack, contact, why-us.
/// Reordering it changes which reply wins for multi-keyword utterances.
pub fn catalogue(facts: &FactTable) -> Vec<Topic> {
    vec![
        Topic {
            id: TopicId::Pricing,
            triggers: &["price", "pricing", "cost"],
            sub_topics: vec![
                SubTopic {
                    id: SubTopicId::SimpleSite,
                    triggers: &["simple", "one page", "1 page"],
                    reply: facts.render(
                        "Simple one-page websites start from {price.simple}. These include responsive design, a contact form, and basic SEO. Perfect for portfolios, landing pages, and startups. Final pricing varies based on specific features and complexity.",
                    ),
                },
                SubTopic {
                    id: SubTopicId::MediumSite,
                    triggers: &["medium", "3", "5"],
                    reply: facts.render(
                        "Medium websites (3-5 pages) start from {price.medium}. These include multiple pages, better UI/UX, performance optimization, and optional AI features. Great for business websites and personal brands.",
                    ),
                },
                SubTopic {
                    id: SubTopicId::LargeSite,
                    triggers: &["large", "advanced", "complex"],
                    reply: facts.render(
                        "Large websites (6-7+ pages) start from {price.large}. These include advanced UI/UX, AI integrations, scalable architecture, and optional admin dashboards. Perfect for companies and platforms with advanced needs.",
                    ),
                },
                SubTopic {
                    id: SubTopicId::MaintenancePlans,
                    triggers: &["maintenance"],
                    reply: facts.render(
                        "We offer three maintenance plans:\n\n• Basic: {maintenance.basic.monthly} (updates, backups, minor fixes)\n• Standard: {maintenance.standard.monthly} (performance monitoring, content updates, security)\n• Premium: {maintenance.premium.monthly} (AI optimization, feature updates, priority support)\n\nYearly plans come with discounted rates.",
                    ),
                },
            ],
            reply: facts.render(
                "We offer three service tiers:\n\n• Simple Website (1 page): Starting from {price.simple}\n• Medium Website (3-5 pages): Starting from {price.medium}\n• Large Website (6-7+ pages): Starting from {price.large}\n\nFinal pricing depends on complexity, features, and AI integrations. Which tier interests you?",
            ),
        },
        Topic {
            id: TopicId::Ai,
            triggers: &["ai", "chatbot", "automation"],
            sub_topics: Vec::new(),
            reply: "We specialize in AI-integrated websites! Our AI services include:\n\n• AI Chatbots (like this one)\n• AI Forms & Automation\n• API Integrations (OpenAI, Claude, custom models)\n• Smart dashboards with analytics\n• AI content generation tools\n\nAI features can be added to any service tier. Would you like to know more about a specific AI feature?".into(),
        },
        Topic {
            id: TopicId::Services,
            triggers: &["service", "what do you", "what can you"],
            sub_topics: Vec::new(),
            reply: "I build professional AI-integrated websites! Services include:\n\n• Simple Websites (1 page) - Portfolios, landing pages\n• Medium Websites (3-5 pages) - Business sites, personal brands\n• Large Websites (6-7+ pages) - Platforms, companies\n\nAll include responsive design, SEO optimization, and can integrate AI features like chatbots, automation, and APIs. What type of website are you looking for?".into(),
        },
        Topic {
            id: TopicId::Maintenance,
            triggers: &["maintenance", "support", "update"],
            sub_topics: Vec::new(),
            reply: facts.render(
                "We offer ongoing maintenance plans:\n\n• Basic ({maintenance.basic.monthly}): Updates, backups, minor fixes\n• Standard ({maintenance.standard.monthly}): Performance monitoring, content updates, security\n• Premium ({maintenance.premium.monthly}): AI optimization, feature updates, priority support\n\nYearly plans offer better rates. What level of support are you looking for?",
            ),
        },
        Topic {
            id: TopicId::Timeline,
            triggers: &["how long", "timeline", "time"],
            sub_topics: Vec::new(),
            reply: facts.render(
                "Typical timelines:\n\n• Simple website: {timeline.simple}\n• Medium website: {timeline.medium}\n• Large website: {timeline.large}\n\nTimelines vary based on complexity, AI integrations, and specific requirements. For custom requirements, please contact us through the contact form.",
            ),
        },
        Topic {
            id: TopicId::TechStack,
            triggers: &["tech", "technology", "stack"],
            sub_topics: Vec::new(),
            reply: "I build with modern, cutting-edge technologies:\n\n• Next.js & React for fast, SEO-friendly sites\n• Tailwind CSS for beautiful, responsive design\n• AI APIs (OpenAI, Claude, custom models)\n• Node.js for backend services\n• Vercel for reliable hosting\n\nAll sites are optimized for performance, SEO, and scalability.".into(),
        },
        Topic {
            id: TopicId::Contact,
            triggers: &["contact", "reach", "email"],
            sub_topics: Vec::new(),
            reply: "You can reach out through the Contact page on this website. Fill out the form with your name, email, and project details. Looking forward to hearing about your project!".into(),
        },
        Topic {
            id: TopicId::WhyUs,
            triggers: &["why", "choose", "better"],
            sub_topics: Vec::new(),
            reply: "Here's why clients choose to work with me:\n\n• AI-first development approach\n• Clean, future-proof code\n• Fast turnaround times\n• Transparent, honest pricing\n• Long-term partnership mindset\n• Full-stack expertise\n• SEO & performance optimization included\n\nI focus on building websites that drive real business results.".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_lookup() {
        let facts = FactTable::default_facts();
        assert_eq!(facts.get("price.simple"), Some("₹25,000"));
        assert_eq!(facts.get("maintenance.premium.monthly"), Some("₹5,000/month"));
        assert_eq!(facts.get("nope"), None);
    }

    #[test]
    fn test_render_substitutes_facts() {
        let facts = FactTable::default_facts();
        let out = facts.render("From {price.simple} to {price.large}.");
        assert_eq!(out, "From ₹25,000 to ₹55,000.");
    }

    #[test]
    fn test_render_keeps_unknown_placeholder() {
        let facts = FactTable::default_facts();
        let out = facts.render("Costs {price.unknown} total");
        assert_eq!(out, "Costs {price.unknown} total");
    }

    #[test]
    fn test_render_unclosed_brace_passthrough() {
        let facts = FactTable::default_facts();
        assert_eq!(facts.render("dangling {price.simple"), "dangling {price.simple");
    }

    #[test]
    fn test_catalogue_priority_order() {
        let facts = FactTable::default_facts();
        let topics = catalogue(&facts);
        let ids: Vec<TopicId> = topics.iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                TopicId::Pricing,
                TopicId::Ai,
                TopicId::Services,
                TopicId::Maintenance,
                TopicId::Timeline,
                TopicId::TechStack,
                TopicId::Contact,
                TopicId::WhyUs,
            ]
        );
    }

    #[test]
    fn test_pricing_sub_topics_declared_order() {
        let facts = FactTable::default_facts();
        let topics = catalogue(&facts);
        let pricing = &topics[0];
        let subs: Vec<SubTopicId> = pricing.sub_topics.iter().map(|s| s.id).collect();
        assert_eq!(
            subs,
            vec![
                SubTopicId::SimpleSite,
                SubTopicId::MediumSite,
                SubTopicId::LargeSite,
                SubTopicId::MaintenancePlans,
            ]
        );
    }

    #[test]
    fn test_templates_fully_rendered() {
        let facts = FactTable::default_facts();
        for topic in catalogue(&facts) {
            assert!(!topic.reply.contains('{'), "unrendered topic {}", topic.id.as_str());
            for sub in &topic.sub_topics {
                assert!(!sub.reply.contains('{'), "unrendered sub {}", sub.id.as_str());
            }
        }
    }
}
