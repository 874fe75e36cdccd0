// Business logic services layer
//
// Pure logic that is shared by the library consumers and the CLI.

pub mod classification;
