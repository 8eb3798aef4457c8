/// Metric names recorded for one operation kind.
#[derive(Copy, Clone, Debug)]
pub struct OperationLabels {
    pub success: &'static str,
    pub error: &'static str,
    pub latency: &'static str,
}

#[macro_export]
macro_rules! generate_labels {
    ($base_name:ident) => {
        $crate::OperationLabels {
            success: concat!("socialdrive_", stringify!($base_name), "_success"),
            error: concat!("socialdrive_", stringify!($base_name), "_error"),
            latency: concat!("socialdrive_", stringify!($base_name), "_latency"),
        }
    };
}
