mod checkout;
mod health_check;
mod helpers;
