pub mod p909_superstore_sales;
