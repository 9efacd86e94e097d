//! Logging macros. With `defmt` they forward to RTT; without it arguments
//! are still type-checked and then dropped.
#![allow(unused)]

#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! info {
    ($($x:tt)*) => { ::defmt::info!($($x)*) };
}

#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}

#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! warn {
    ($($x:tt)*) => { ::defmt::warn!($($x)*) };
}

#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}

#[cfg(feature = "defmt")]
#[macro_export]
macro_rules! error {
    ($($x:tt)*) => { ::defmt::error!($($x)*) };
}

#[cfg(not(feature = "defmt"))]
#[macro_export]
macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{ let _ = ($( & $x ),*); }};
}
