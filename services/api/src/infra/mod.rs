pub mod braintree;
pub mod db;
