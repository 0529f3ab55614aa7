mod core;

pub use self::core::{Breadcrumb, BreadcrumbListener, BreadcrumbSettings};
