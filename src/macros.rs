/// Builds an [`ArrayMap`](crate::ctrie::ArrayMap) from a literal table.
///
/// Each entry is `key => value`; a single `default => value` entry sets the
/// value returned for absent keys. Evaluates to
/// `Result<ArrayMap<T, C>, BuildError<C>>`, failing on the first duplicate key
/// or second default.
///
/// ```
/// use libctrie::array_map;
///
/// let flags = array_map! {
///     "-v" => 1,
///     "--verbose" => 1,
///     "-q" => 2,
///     default => 0,
/// }
/// .unwrap();
/// assert_eq!(flags["--verbose"], 1);
/// assert_eq!(flags["-x"], 0);
///
/// assert!(array_map! { "-v" => 1, "-v" => 2 }.is_err());
/// ```
#[macro_export]
macro_rules! array_map {
    (@insert $builder:ident;) => {};
    (@insert $builder:ident; default => $value:expr $(, $($rest:tt)*)?) => {
        $builder.insert_default($value)?;
        $crate::array_map!(@insert $builder; $($($rest)*)?);
    };
    (@insert $builder:ident; $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $builder.insert(&$key, $value)?;
        $crate::array_map!(@insert $builder; $($($rest)*)?);
    };
    ($($body:tt)*) => {
        (|| -> ::core::result::Result<_, $crate::ctrie::BuildError<_>> {
            #[allow(unused_mut)]
            let mut builder = $crate::ctrie::MapBuilder::new();
            $crate::array_map!(@insert builder; $($body)*);
            ::core::result::Result::Ok(builder.build())
        })()
    };
}
