use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    ConfigNotSet = 700,
    AdminNotSet = 701,
    Unauthorized = 702,
    InvalidPoolWeight = 703,
    InvalidMinDepositAmount = 704,
    InvalidUnstakeLockedBlock = 705,
    InvalidB2PerBlock = 706,
    EndLessThanStart = 707,
    ExceedEndBlock = 708,
    FirstStakePoolNotNative = 709,
    InvalidStakeAddress = 710,
    PoolIdNotExist = 711,
    PoolRewardAlreadyComputed = 712,
    DepositNotSupportNative = 713,
    DepositTooSmall = 714,
    NotStaked = 715,
    UnstakeExceedStakeAmount = 716,
    NoUnstakeRequest = 717,
    NoReward = 718,
    WithdrawAlreadyPaused = 719,
    ClaimAlreadyPaused = 720,
    NotAccountSelf = 721,
    NegativeInputProvided = 722,
    ContractMathError = 723,
    SameAdmin = 724,
    NoAdminChangeInPlace = 725,
    AdminChangeExpired = 726,
}
