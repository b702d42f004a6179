//! # Label Pipeline Tests
//!
//! End-to-end checks of composition, dispatch and the button loop using a
//! fixed-metric text renderer and a recording spooler, so no font file,
//! GPIO chip or printer is needed.
