mod helpers;

mod auth_test;
mod order_test;
mod payment_test;
