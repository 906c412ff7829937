pub mod debates;
