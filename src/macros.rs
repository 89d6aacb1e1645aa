#[macro_export]
macro_rules! expect {
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(t) => t,
            Err(why) => {
                panic!("{}: {:?}", $msg, why);
            }
        }
    };
}

#[macro_export]
macro_rules! routa_trace {
    ($($args:tt)*) => {
        log::trace!($($args)*)
    };
}

#[macro_export]
macro_rules! routa_debug {
    ($($args:tt)*) => {
        log::debug!($($args)*)
    };
}

#[macro_export]
macro_rules! routa_info {
    ($($args:tt)*) => {
        log::info!($($args)*)
    };
}

#[macro_export]
macro_rules! routa_warn {
    ($($args:tt)*) => {
        log::warn!($($args)*)
    };
}

#[macro_export]
macro_rules! routa_error {
    ($($args:tt)*) => {
        log::error!($($args)*)
    };
}
