//! Catalog features.

mod create_product;
mod get_product_by_id;
mod get_products;
mod update_product;

pub use create_product::{CreateProduct, CreateProductHandler};
pub use get_product_by_id::{GetProductById, GetProductByIdHandler};
pub use get_products::{GetProducts, GetProductsHandler};
pub use update_product::{UpdateProduct, UpdateProductHandler};

use storefront_core::mediator::{HandlerRegistry, Result, Violation};

use super::Dependencies;

pub fn register(registry: &mut HandlerRegistry, deps: &Dependencies) -> Result<()> {
    registry.register::<CreateProduct, _>(CreateProductHandler::new(deps))?;
    registry.register::<UpdateProduct, _>(UpdateProductHandler::new(deps))?;
    registry.register::<GetProductById, _>(GetProductByIdHandler::new(deps))?;
    registry.register::<GetProducts, _>(GetProductsHandler::new(deps))?;
    Ok(())
}

const MAX_NAME_LEN: usize = 250;

fn check_name(name: &str, violations: &mut Vec<Violation>) {
    if name.trim().is_empty() {
        violations.push(Violation::new("name", "must not be empty"));
    } else if name.chars().count() > MAX_NAME_LEN {
        violations.push(Violation::new(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
}

fn check_price(price: f64, violations: &mut Vec<Violation>) {
    if !price.is_finite() || price <= 0.0 {
        violations.push(Violation::new("price", "must be greater than zero"));
    }
}
