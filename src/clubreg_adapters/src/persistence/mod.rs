pub mod hashmap_account_store;
pub mod hashmap_otp_store;

pub use hashmap_account_store::{EventRecord, HashMapAccountStore, MemberRecord};
pub use hashmap_otp_store::HashMapOtpStore;
