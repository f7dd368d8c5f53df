//! Service layer providing the option CRUD + soft-delete contract.
//! - One generic [`option::OptionService`] serves every catalogue kind.
//! - Persistence sits behind [`option::repository::OptionRepository`].
//! - Errors are the uniform [`errors::ServiceError`] taxonomy.

pub mod errors;
pub mod option;
#[cfg(test)]
pub mod test_support;
