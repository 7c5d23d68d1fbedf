//! `validator!`: one declaration per validator.
//!
//! Every validator in this crate is a struct, a `Validate` impl with a
//! pass/fail rule and an error builder, and a lower-case factory function.
//! The macro writes all three.
//!
//! ```rust,ignore
//! validator! {
//!     pub Positive for f64;
//!     rule(input) { *input > 0.0 }
//!     error(input) { ValidationError::new("positive", "Must be positive") }
//!     fn positive();
//! }
//! ```

/// Declares a validator.
///
/// The struct always derives `Debug` and `Clone`; unit validators also get
/// `Copy`, `PartialEq`, `Eq`, `Hash` and `Default`. Extra attributes go
/// before the visibility.
///
/// Constructors, by shape:
///
/// | declaration                          | generated                          |
/// |--------------------------------------|------------------------------------|
/// | `pub Name for I;`                    | `const fn factory() -> Name`       |
/// | `pub Name { a: A } for I;`           | `Name::new(a)`, `factory(a)`       |
/// | `... new(args) { body }`             | `Name::new(args) -> Self`          |
/// | `... new(args) -> E { body }`        | `Name::new(args) -> Result<Self, E>` |
#[macro_export]
macro_rules! validator {
    // unit
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident for $input:ty;
        rule($inp:ident) $rule:block
        error($einp:ident) $err:block
        fn $factory:ident();
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $name;

        $crate::validator!(@validate $name, $input, self, $inp, $rule, $einp, $err);

        #[must_use]
        $vis const fn $factory() -> $name {
            $name
        }
    };

    // fields, `new` returns a Result
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($s:ident, $inp:ident) $rule:block
        error($s2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) -> $ety:ty $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?) -> $efty:ty;
    ) => {
        $crate::validator!(@struct [$(#[$meta])*] $vis $name { $($field: $fty),+ });
        $crate::validator!(@validate $name, $input, $s, $inp, $rule, $einp, $err);

        impl $name {
            pub fn new($($narg: $naty),*) -> ::core::result::Result<Self, $ety> $new_body
        }

        $vis fn $factory($($farg: $faty),*) -> ::core::result::Result<$name, $efty> {
            $name::new($($farg),*)
        }
    };

    // fields, hand-written `new`
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($s:ident, $inp:ident) $rule:block
        error($s2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator!(@struct [$(#[$meta])*] $vis $name { $($field: $fty),+ });
        $crate::validator!(@validate $name, $input, $s, $inp, $rule, $einp, $err);

        #[allow(clippy::new_without_default)]
        impl $name {
            #[must_use]
            pub fn new($($narg: $naty),*) -> Self $new_body
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    // fields, `new` takes every field in order
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($s:ident, $inp:ident) $rule:block
        error($s2:ident, $einp:ident) $err:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $crate::validator!(@struct [$(#[$meta])*] $vis $name { $($field: $fty),+ });
        $crate::validator!(@validate $name, $input, $s, $inp, $rule, $einp, $err);

        impl $name {
            #[must_use]
            pub fn new($($field: $fty),+) -> Self {
                Self { $($field),+ }
            }
        }

        #[must_use]
        $vis fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };

    (@struct [$(#[$meta:meta])*] $vis:vis $name:ident { $($field:ident: $fty:ty),+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }
    };

    (@validate $name:ident, $input:ty, $s:ident, $inp:ident, $rule:block, $einp:ident, $err:block) => {
        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$s, $inp: &Self::Input) -> ::core::result::Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    return Ok(());
                }
                let $einp = $inp;
                Err($err)
            }
        }
    };
}
