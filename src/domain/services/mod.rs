pub mod alert_cleanup;
