pub mod d402_sales_drilldown;
