mod admin_change;
mod claim;
