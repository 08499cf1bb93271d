//! Shared test harness modules for the matprops CLI.

use super::*;

mod helpers;
