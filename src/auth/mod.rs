// Authentication module
// Token verification for the mutating endpoints

pub mod jwt;
