pub mod alpha_ess;
