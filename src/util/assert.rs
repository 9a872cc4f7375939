use std::fmt::Debug;

pub fn assert_same_type<T>(_: &T, _: &T) {}
pub fn assert_type<T>(_: &T) {}

#[track_caller]
pub fn fail(location: String, condition: &str, extra: Option<String>) -> ! {
    match extra {
        Some(extra) => panic!("check failed: {location}: {condition}: {extra}"),
        None => panic!("check failed: {location}: {condition}"),
    }
}

#[track_caller]
pub fn fail_cmp<T: Debug>(
    location: String,
    condition: String,
    lhs: &T,
    rhs: &T,
    extra: Option<String>,
) -> ! {
    let extra = extra.map_or_else(String::new, |extra| format!(": {extra}"));
    panic!("check failed: {location}: {condition}: {lhs:?} vs. {rhs:?}{extra}");
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! current_location {
    () => {
        format!("{}:{}", file!(), line!())
    };
}
#[allow(unused_imports)]
pub use current_location;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check {
    ($cond:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if !value {
            $crate::util::assert::fail(
                $crate::util::assert::current_location!(),
                stringify!($cond),
                None,
            );
        }
    }};
    ($cond:expr, $extra:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if !value {
            $crate::util::assert::fail(
                $crate::util::assert::current_location!(),
                stringify!($cond),
                Some($extra.to_string()),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_false {
    ($cond:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if value {
            $crate::util::assert::fail(
                $crate::util::assert::current_location!(),
                concat!("!", stringify!($cond)),
                None,
            );
        }
    }};
    ($cond:expr, $extra:expr) => {{
        let value = $cond;
        $crate::util::assert::assert_type::<bool>(&value);
        if value {
            $crate::util::assert::fail(
                $crate::util::assert::current_location!(),
                concat!("!", stringify!($cond)),
                Some($extra.to_string()),
            );
        }
    }};
}
#[allow(unused_imports)]
pub use check_false;

// Shared body of the binary comparison checks.
#[doc(hidden)]
#[macro_export]
macro_rules! check_cmp_impl {
    ($lhs:expr, $rhs:expr, $op:tt, $extra:expr) => {{
        let lhs = $lhs;
        let rhs = $rhs;
        $crate::util::assert::assert_same_type(&lhs, &rhs);
        if !(lhs $op rhs) {
            $crate::util::assert::fail_cmp(
                $crate::util::assert::current_location!(),
                format!("{} {} {}", stringify!($lhs), stringify!($op), stringify!($rhs)),
                &lhs,
                &rhs,
                $extra,
            );
        }
    }};
}

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_lt {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp_impl!($lhs, $rhs, <, None)
    };
    ($lhs:expr, $rhs:expr, $extra:expr) => {
        $crate::check_cmp_impl!($lhs, $rhs, <, Some($extra.to_string()))
    };
}
#[allow(unused_imports)]
pub use check_lt;

#[allow(unused_macros)]
#[macro_export]
macro_rules! check_gt {
    ($lhs:expr, $rhs:expr) => {
        $crate::check_cmp_impl!($lhs, $rhs, >, None)
    };
    ($lhs:expr, $rhs:expr, $extra:expr) => {
        $crate::check_cmp_impl!($lhs, $rhs, >, Some($extra.to_string()))
    };
}
#[allow(unused_imports)]
pub use check_gt;
