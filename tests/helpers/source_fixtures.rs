//! Proto sources shared across tests.

/// `p.M` with nested `p.M.N`.
pub const NESTED_ROOT: &str = r#"
syntax = "proto2";
package p;

message M {
  message N {
    optional string s = 1;
  }
  optional N n = 1;
}
"#;

/// Importer in package `x`, importing an unrelated package `y`.
pub const UNRELATED_IMPORTER: &str = r#"
syntax = "proto3";
package x;
import "b.proto";

message Local {
  y.Foo foo = 1;
}
"#;

pub const UNRELATED_IMPORTED: &str = r#"
syntax = "proto3";
package y;

message Foo {
  enum Kind {
    KIND_UNSPECIFIED = 0;
  }
}
"#;

/// Package `a.b` importing its nested package `a.b.c`.
pub const PARENT_PACKAGE: &str = r#"
package a.b;
import "child.proto";

message Parent {}
"#;

pub const CHILD_PACKAGE: &str = r#"
package a.b.c;

message Child {}
"#;

/// Sibling packages sharing the `a.b` prefix.
pub const SIBLING_IMPORTER: &str = r#"
package a.b.x;
import "sibling.proto";
"#;

pub const SIBLING_IMPORTED: &str = r#"
package a.b.y;

message Shared {}
"#;

/// `c.proto` imports `a.proto`, which imports `b.proto` publicly.
pub const REEXPORT_CONSUMER: &str = r#"
package p;
import "a.proto";
"#;

pub const PUBLIC_REEXPORTER: &str = r#"
package p;
import public "b.proto";

message FromA {}
"#;

pub const PRIVATE_IMPORTER: &str = r#"
package p;
import "b.proto";

message FromA {}
"#;

pub const REEXPORTED: &str = r#"
package p;

message FromB {}
"#;

/// A two-document import cycle through public imports.
pub const CYCLE_LEFT: &str = r#"
package cycle;
import public "right.proto";

message Left {}
"#;

pub const CYCLE_RIGHT: &str = r#"
package cycle;
import public "left.proto";

message Right {}
"#;

/// A document that uses the descriptor for custom options.
pub const DESCRIPTOR_IMPORTER: &str = r#"
syntax = "proto2";
package opts;
import "google/protobuf/descriptor.proto";

extend google.protobuf.FieldOptions {
  optional string label = 50001;
}

message Annotated {
  optional int32 id = 1 [(label) = "identifier"];
}
"#;

/// A real file that sits at the descriptor path.
pub const FAKE_DESCRIPTOR: &str = r#"
package google.protobuf;

message OnlyInTheFakeFile {}
"#;
