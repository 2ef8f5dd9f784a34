pub mod errors;
pub mod db;
pub mod registry;

pub mod address;
pub mod person;
pub mod contact;
pub mod contact_person;
pub mod company;
pub mod department;
pub mod employee;
pub mod resource_meta;
pub mod unique_id;
pub mod numbering;
pub mod postal;
pub mod spectrum;
pub mod telecom;
pub mod typeapproval;
pub mod user;

pub use registry::Registry;

#[cfg(test)]
mod tests;
