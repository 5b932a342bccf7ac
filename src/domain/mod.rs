// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits that define the core concepts
// of the system.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - NO ML-specific code
//   - Only plain Rust structs, enums, and traits
//
// Why keep this layer pure?
//   - Easy to unit test (no tensor backend needed)
//   - Easy to understand (no framework noise)
//   - Easy to swap implementations (just implement the trait)
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A loaded plain-text document from disk
pub mod document;

// Character windows, labels, and the binary/multiclass mode tag
pub mod window;

// Core abstractions (traits) that other layers implement
pub mod traits;
