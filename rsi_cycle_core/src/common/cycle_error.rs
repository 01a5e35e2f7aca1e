use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Error codes for the cycle analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[repr(i32)]
pub enum ErrCode {
    // Analysis errors (0-99)
    #[strum(serialize = "_CYCLE_ERR_BEGIN")]
    CycleErrBegin = 0,
    #[strum(serialize = "PARA_ERROR")]
    ParaError = 5,
    #[strum(serialize = "EMPTY_SERIES")]
    EmptySeries = 6,
    #[strum(serialize = "INVALID_INPUT")]
    InvalidInput = 7,
    #[strum(serialize = "DIVISION_UNDEFINED")]
    DivisionUndefined = 8,
    #[strum(serialize = "CONFIG_ERROR")]
    ConfigError = 17,
    #[strum(serialize = "SRC_DATA_FORMAT_ERROR")]
    SrcDataFormatError = 18,
    #[strum(serialize = "_CYCLE_ERR_END")]
    CycleErrEnd = 99,

    // KL data errors (200-299)
    #[strum(serialize = "_KL_ERR_BEGIN")]
    KlErrBegin = 200,
    #[strum(serialize = "KL_DATA_INVALID")]
    KlDataInvalid = 203,
    #[strum(serialize = "KL_NOT_MONOTONOUS")]
    KlNotMonotonous = 206,
    #[strum(serialize = "NO_DATA")]
    NoData = 210,
    #[strum(serialize = "_KL_ERR_END")]
    KlErrEnd = 299,
}

impl ErrCode {
    pub fn is_kldata_err(&self) -> bool {
        let code = *self as i32;
        code > Self::KlErrBegin as i32 && code < Self::KlErrEnd as i32
    }

    pub fn is_cycle_err(&self) -> bool {
        let code = *self as i32;
        code > Self::CycleErrBegin as i32 && code < Self::CycleErrEnd as i32
    }
}

#[derive(Debug, Clone, Error)]
#[error("{errcode}: {msg}")]
pub struct CycleError {
    pub errcode: ErrCode,
    pub msg: String,
}

impl CycleError {
    pub fn new(message: impl Into<String>, code: ErrCode) -> Self {
        Self {
            errcode: code,
            msg: message.into(),
        }
    }

    /// Bad period/threshold configuration, raised before any computation starts
    pub fn para(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::ParaError)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(message, ErrCode::InvalidInput)
    }

    pub fn is_para_err(&self) -> bool {
        self.errcode == ErrCode::ParaError
    }

    pub fn is_kldata_err(&self) -> bool {
        self.errcode.is_kldata_err()
    }

    pub fn is_cycle_err(&self) -> bool {
        self.errcode.is_cycle_err()
    }
}

pub type CycleResult<T> = Result<T, CycleError>;
