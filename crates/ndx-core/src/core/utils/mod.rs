pub mod natural;
