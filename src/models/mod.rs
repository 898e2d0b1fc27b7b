// ABOUTME: Core data models for sections, site information, client configurations and users

pub mod client;
pub mod section;
pub mod site;
pub mod user;

pub use client::{ClientConfiguration, ClientId, CreateClientRequest, PreviewSnapshot, RenderedSite};
pub use section::{FieldKind, FieldSpec, Section, SectionCategory, SectionConfiguration};
pub use site::{BasicInfo, CompanyInfo, DomainConfig, DomainType, SiteStyle, ThemeConfig};
pub use user::{CurrentUser, UserRole, UserStatus};
