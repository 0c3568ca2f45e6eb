//! Request and response models of the CQES API, and the HTTP seam used to
//! exchange them.

pub mod certificate;
pub mod content;
pub mod identification;
pub mod identity;
pub mod language;
pub mod object;
pub mod qr;
pub mod response;
pub mod sign;
pub mod util;
