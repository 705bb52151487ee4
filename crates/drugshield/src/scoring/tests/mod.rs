mod common;
mod floors;
