// ABOUTME: Built-in section definitions shipped with the portal
// Defined once at startup, never mutated

use serde_json::{json, Value};

use crate::models::{FieldKind, FieldSpec, Section, SectionCategory};

use FieldKind::{Boolean, Email, Image, List, LongText, Number, Phone, Text, Url};

struct Definition {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    required: bool,
    category: SectionCategory,
    icon: &'static str,
    fields: &'static [(&'static str, FieldKind, bool)],
}

const DEFINITIONS: &[Definition] = &[
    Definition {
        id: "hero",
        name: "Hero",
        description: "Main banner with headline and call to action",
        required: true,
        category: SectionCategory::Content,
        icon: "layout",
        fields: &[
            ("title", Text, true),
            ("subtitle", Text, false),
            ("backgroundImage", Image, false),
            ("ctaText", Text, false),
            ("ctaLink", Url, false),
        ],
    },
    Definition {
        id: "about",
        name: "About us",
        description: "Company story, mission and values",
        required: false,
        category: SectionCategory::Content,
        icon: "info",
        fields: &[
            ("title", Text, true),
            ("content", LongText, true),
            ("image", Image, false),
        ],
    },
    Definition {
        id: "services",
        name: "Services",
        description: "List of services offered",
        required: false,
        category: SectionCategory::Content,
        icon: "briefcase",
        fields: &[("title", Text, true), ("items", List, true)],
    },
    Definition {
        id: "products",
        name: "Products",
        description: "Featured products from the store catalog",
        required: false,
        category: SectionCategory::Commerce,
        icon: "shopping-bag",
        fields: &[
            ("title", Text, true),
            ("showPrices", Boolean, false),
            ("maxItems", Number, false),
        ],
    },
    Definition {
        id: "gallery",
        name: "Gallery",
        description: "Image gallery",
        required: false,
        category: SectionCategory::Content,
        icon: "image",
        fields: &[("title", Text, false), ("images", List, true)],
    },
    Definition {
        id: "testimonials",
        name: "Testimonials",
        description: "Customer reviews and quotes",
        required: false,
        category: SectionCategory::Social,
        icon: "message-square",
        fields: &[("title", Text, false), ("items", List, true)],
    },
    Definition {
        id: "team",
        name: "Team",
        description: "People behind the business",
        required: false,
        category: SectionCategory::Content,
        icon: "users",
        fields: &[("title", Text, false), ("members", List, true)],
    },
    Definition {
        id: "faq",
        name: "FAQ",
        description: "Frequently asked questions",
        required: false,
        category: SectionCategory::Content,
        icon: "help-circle",
        fields: &[("title", Text, false), ("questions", List, true)],
    },
    Definition {
        id: "social",
        name: "Social media",
        description: "Links to social profiles",
        required: false,
        category: SectionCategory::Social,
        icon: "share-2",
        fields: &[
            ("facebook", Url, false),
            ("instagram", Url, false),
            ("tiktok", Url, false),
            ("whatsapp", Phone, false),
        ],
    },
    Definition {
        id: "contact",
        name: "Contact",
        description: "Contact details and message form",
        required: false,
        category: SectionCategory::Contact,
        icon: "mail",
        fields: &[
            ("email", Email, true),
            ("phone", Phone, false),
            ("address", Text, false),
            ("showForm", Boolean, false),
        ],
    },
];

fn default_data(id: &str) -> Option<Value> {
    let data = match id {
        "hero" => json!({
            "title": "Bienvenidos",
            "subtitle": "Descubre lo que tenemos para ti",
            "ctaText": "Ver más",
        }),
        "about" => json!({
            "title": "Sobre nosotros",
        }),
        "services" => json!({ "title": "Servicios", "items": [] }),
        "products" => json!({ "title": "Productos", "showPrices": true, "maxItems": 8 }),
        "gallery" => json!({ "title": "Galería", "images": [] }),
        "testimonials" => json!({ "title": "Testimonios", "items": [] }),
        "team" => json!({ "title": "Nuestro equipo", "members": [] }),
        "faq" => json!({ "title": "Preguntas frecuentes", "questions": [] }),
        "contact" => json!({ "showForm": true }),
        _ => return None,
    };
    Some(data)
}

/// Catalog definitions in display order
pub fn builtin_sections() -> Vec<Section> {
    DEFINITIONS
        .iter()
        .zip(1u32..)
        .map(|(def, order)| Section {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            required: def.required,
            default_order: order,
            template: format!("sections/{}", def.id),
            category: def.category,
            icon: def.icon.to_string(),
            schema: def
                .fields
                .iter()
                .map(|(name, kind, required)| {
                    let spec = if *required {
                        FieldSpec::required(*kind)
                    } else {
                        FieldSpec::optional(*kind)
                    };
                    ((*name).to_string(), spec)
                })
                .collect(),
            default_data: default_data(def.id),
        })
        .collect()
}
