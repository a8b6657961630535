use crate::components::carousel::Slide;

pub struct Service {
    pub icon: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
}

pub struct PricingTier {
    pub name: &'static str,
    pub price: &'static str,
    pub cadence: &'static str,
    pub features: &'static [&'static str],
    pub featured: bool,
}

pub const SERVICES: &[Service] = &[
    Service {
        icon: "/assets/icons/landing.svg",
        name: "Landing pages",
        summary: "One fast page that explains what you do and gets people to reach out.",
    },
    Service {
        icon: "/assets/icons/business.svg",
        name: "Business sites",
        summary: "Multi-page sites with a blog, contact flow and easy content editing.",
    },
    Service {
        icon: "/assets/icons/shop.svg",
        name: "Online shops",
        summary: "Product catalogue, checkout and payments wired up and tested.",
    },
    Service {
        icon: "/assets/icons/care.svg",
        name: "Care plans",
        summary: "Hosting, updates and small changes handled every month.",
    },
];

pub const PRICING: &[PricingTier] = &[
    PricingTier {
        name: "Starter",
        price: "€490",
        cadence: "one-off",
        features: &["Single landing page", "Mobile friendly", "Contact form", "1 revision round"],
        featured: false,
    },
    PricingTier {
        name: "Growth",
        price: "€1,490",
        cadence: "one-off",
        features: &[
            "Up to 6 pages",
            "Blog setup",
            "Basic SEO",
            "Analytics",
            "3 revision rounds",
        ],
        featured: true,
    },
    PricingTier {
        name: "Commerce",
        price: "€2,990",
        cadence: "one-off",
        features: &["Online shop", "Payment integration", "Inventory training", "Unlimited revisions"],
        featured: false,
    },
];

/// Portfolio entries for the carousel.
pub fn portfolio() -> Vec<Slide> {
    vec![
        Slide {
            title: "Kahvila Aalto",
            image: "/assets/portfolio/cafe.webp",
            caption: "Menu, opening hours and table bookings for a neighbourhood café.",
        },
        Slide {
            title: "Lumo Yoga",
            image: "/assets/portfolio/yoga.webp",
            caption: "Class schedule and membership sign-up.",
        },
        Slide {
            title: "Pohjoinen Timber",
            image: "/assets/portfolio/timber.webp",
            caption: "Catalogue and quote requests for a sawmill.",
        },
        Slide {
            title: "Studio Helmi",
            image: "/assets/portfolio/jewelry.webp",
            caption: "Online shop for handmade jewellery.",
        },
    ]
}
