//! Defaults written by `ContentStore::initialize` when absent.

pub const BOOTSTRAP_USERNAME: &str = "admin";
/// Publicly known; operators must change it after install.
pub const BOOTSTRAP_PASSWORD: &str = "admin123";

/// `(section, key, value)` copy for a fresh site.
pub const DEFAULT_CONTENT: &[(&str, &str, &str)] = &[
    ("hero", "title", "A Lead Generation Powerhouse"),
    (
        "hero",
        "subtitle",
        "We fill your pipeline with qualified prospects so your team can focus on closing.",
    ),
    ("hero", "cta", "Book a Strategy Call"),
    ("stats", "leads_generated", "250,000+"),
    ("stats", "clients_served", "120+"),
    ("stats", "avg_roi", "4.7x"),
    ("services", "title", "What We Do"),
    (
        "services",
        "outbound",
        "Multi-channel outbound campaigns built on verified, intent-driven data.",
    ),
    (
        "services",
        "appointment_setting",
        "Dedicated SDRs who book meetings straight into your calendar.",
    ),
    ("pricing", "title", "Simple, Performance-Based Pricing"),
    ("pricing", "starter", "$1,500 / month"),
    ("pricing", "growth", "$3,500 / month"),
    ("pricing", "enterprise", "Custom"),
    ("contact", "email", "hello@example.com"),
    ("contact", "tagline", "Ready to grow? Let's talk."),
];
