use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use clubreg_core::{
    Account, AccountId, AccountStore, AccountStoreError, CredentialHasher, Email, NewAccount,
    Password,
};

/// A member row owned by one club account.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRecord {
    pub id: Uuid,
    pub account_id: AccountId,
    pub name: String,
}

/// An event row owned by one club account.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: Uuid,
    pub account_id: AccountId,
    pub title: String,
    pub starts_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<AccountId, Account>,
    members: HashMap<AccountId, Vec<MemberRecord>>,
    events: HashMap<AccountId, Vec<EventRecord>>,
}

impl Inner {
    fn find_by_email(&self, email: &Email) -> Option<&Account> {
        self.accounts.values().find(|a| a.email() == email)
    }

    fn remove_cascading(&mut self, id: &AccountId) -> Option<Account> {
        self.members.remove(id);
        self.events.remove(id);
        self.accounts.remove(id)
    }
}

/// In-memory account registry.
///
/// All mutation happens under a single write guard per call, which is the
/// only concurrency primitive the design relies on: the duplicate check and
/// the insert of `create` cannot interleave with another `create` for the
/// same email or name.
#[derive(Clone)]
pub struct HashMapAccountStore<H> {
    inner: Arc<RwLock<Inner>>,
    hasher: H,
}

impl<H> HashMapAccountStore<H>
where
    H: CredentialHasher + Clone,
{
    pub fn new(hasher: H) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            hasher,
        }
    }

    // Member and event rows are plain attribute storage outside the
    // credential state machine; they exist here so `delete` has something to
    // cascade over.

    pub async fn add_member(
        &self,
        account_id: AccountId,
        name: String,
    ) -> Result<MemberRecord, AccountStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.accounts.contains_key(&account_id) {
            return Err(AccountStoreError::AccountNotFound);
        }
        let record = MemberRecord {
            id: Uuid::new_v4(),
            account_id,
            name,
        };
        inner.members.entry(account_id).or_default().push(record.clone());
        Ok(record)
    }

    pub async fn members(&self, account_id: &AccountId) -> Vec<MemberRecord> {
        let inner = self.inner.read().await;
        inner.members.get(account_id).cloned().unwrap_or_default()
    }

    pub async fn add_event(
        &self,
        account_id: AccountId,
        title: String,
        starts_at: DateTime<Utc>,
    ) -> Result<EventRecord, AccountStoreError> {
        let mut inner = self.inner.write().await;
        if !inner.accounts.contains_key(&account_id) {
            return Err(AccountStoreError::AccountNotFound);
        }
        let record = EventRecord {
            id: Uuid::new_v4(),
            account_id,
            title,
            starts_at,
        };
        inner.events.entry(account_id).or_default().push(record.clone());
        Ok(record)
    }

    pub async fn events(&self, account_id: &AccountId) -> Vec<EventRecord> {
        let inner = self.inner.read().await;
        inner.events.get(account_id).cloned().unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl<H> AccountStore for HashMapAccountStore<H>
where
    H: CredentialHasher + Clone,
{
    #[tracing::instrument(name = "Creating account", skip_all)]
    async fn create(&self, new_account: NewAccount) -> Result<Account, AccountStoreError> {
        // Hash outside the guard; hashing is deliberately slow.
        let password_hash = self
            .hasher
            .hash(&new_account.password)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let mut inner = self.inner.write().await;

        // The name and the email can each be held by a different account, so
        // resolve every match: any verified holder blocks the signup, and
        // every unverified holder is reclaimed before the insert.
        let matches: Vec<(AccountId, bool)> = inner
            .accounts
            .values()
            .filter(|a| a.email() == &new_account.email || a.name() == &new_account.name)
            .map(|a| (a.id(), a.is_verified()))
            .collect();

        if matches.iter().any(|(_, verified)| *verified) {
            return Err(AccountStoreError::DuplicateActive);
        }
        for (id, _) in matches {
            inner.remove_cascading(&id);
        }

        let account = Account::new(
            new_account.name,
            new_account.description,
            new_account.email,
            password_hash,
        );
        inner.accounts.insert(account.id(), account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let inner = self.inner.read().await;
        inner
            .find_by_email(email)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let inner = self.inner.read().await;
        inner
            .accounts
            .get(id)
            .cloned()
            .ok_or(AccountStoreError::AccountNotFound)
    }

    #[tracing::instrument(name = "Validating account credentials", skip_all)]
    async fn authenticate(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<Account, AccountStoreError> {
        let account = {
            let inner = self.inner.read().await;
            inner
                .find_by_email(email)
                .cloned()
                .ok_or(AccountStoreError::AccountNotFound)?
        };

        if !self.hasher.verify(password, account.password_hash()) {
            return Err(AccountStoreError::IncorrectPassword);
        }

        Ok(account)
    }

    async fn mark_verified(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.mark_verified();
        Ok(())
    }

    #[tracing::instrument(name = "Setting new account password", skip_all)]
    async fn update_password(
        &self,
        id: &AccountId,
        new_password: Password,
    ) -> Result<(), AccountStoreError> {
        let password_hash = self
            .hasher
            .hash(&new_password)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let mut inner = self.inner.write().await;
        let account = inner
            .accounts
            .get_mut(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        account.set_password_hash(password_hash);
        Ok(())
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountStoreError> {
        let mut inner = self.inner.write().await;
        inner
            .remove_cascading(id)
            .ok_or(AccountStoreError::AccountNotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::Argon2CredentialHasher;
    use clubreg_core::ClubName;
    use secrecy::Secret;

    fn store() -> HashMapAccountStore<Argon2CredentialHasher> {
        HashMapAccountStore::new(Argon2CredentialHasher::new())
    }

    fn email(s: &str) -> Email {
        Email::try_from(Secret::new(s.to_string())).unwrap()
    }

    fn password(s: &str) -> Password {
        Password::try_from(Secret::new(s.to_string())).unwrap()
    }

    fn new_account(name: &str, addr: &str, pw: &str) -> NewAccount {
        NewAccount {
            name: ClubName::try_from(name.to_string()).unwrap(),
            description: "A club".to_string(),
            email: email(addr),
            password: password(pw),
        }
    }

    #[tokio::test]
    async fn create_stores_a_hash_not_the_password() {
        let store = store();
        let account = store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();
        assert!(!account.is_verified());
        use secrecy::ExposeSecret;
        assert_ne!(account.password_hash().expose_secret(), "secret123");
        assert!(store.authenticate(&email("a@x.com"), &password("secret123")).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_name_of_a_verified_account_is_rejected() {
        let store = store();
        let account = store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();
        store.mark_verified(&account.id()).await.unwrap();

        let result = store
            .create(new_account("Chess Club", "other@x.com", "secret456"))
            .await;
        assert_eq!(result.unwrap_err(), AccountStoreError::DuplicateActive);
    }

    #[tokio::test]
    async fn unverified_slot_is_reclaimed_with_children() {
        let store = store();
        let first = store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();
        store
            .add_member(first.id(), "Alice".to_string())
            .await
            .unwrap();

        let second = store
            .create(new_account("Chess Club", "a@x.com", "secret456"))
            .await
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(
            store.find_by_id(&first.id()).await.unwrap_err(),
            AccountStoreError::AccountNotFound
        );
        assert!(store.members(&first.id()).await.is_empty());
        // Only the replacement's password works now.
        assert!(store.authenticate(&email("a@x.com"), &password("secret456")).await.is_ok());
        assert_eq!(
            store
                .authenticate(&email("a@x.com"), &password("secret123"))
                .await
                .unwrap_err(),
            AccountStoreError::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn create_reclaims_every_unverified_match() {
        let store = store();
        let by_name = store
            .create(new_account("Alpha Club", "alpha@x.com", "secret123"))
            .await
            .unwrap();
        let by_email = store
            .create(new_account("Beta Club", "beta@x.com", "secret123"))
            .await
            .unwrap();

        // Collides with the first by name and the second by email.
        let merged = store
            .create(new_account("Alpha Club", "beta@x.com", "secret456"))
            .await
            .unwrap();

        assert_eq!(
            store.find_by_id(&by_name.id()).await.unwrap_err(),
            AccountStoreError::AccountNotFound
        );
        assert_eq!(
            store.find_by_id(&by_email.id()).await.unwrap_err(),
            AccountStoreError::AccountNotFound
        );
        assert_eq!(
            store.find_by_email(&email("beta@x.com")).await.unwrap().id(),
            merged.id()
        );
        // The name-holder's email is free again, nothing answers for it.
        assert_eq!(
            store.find_by_email(&email("alpha@x.com")).await.unwrap_err(),
            AccountStoreError::AccountNotFound
        );
    }

    #[tokio::test]
    async fn a_verified_match_blocks_creation_even_alongside_an_unverified_one() {
        let store = store();
        let verified = store
            .create(new_account("Alpha Club", "alpha@x.com", "secret123"))
            .await
            .unwrap();
        store.mark_verified(&verified.id()).await.unwrap();
        let pending = store
            .create(new_account("Beta Club", "beta@x.com", "secret123"))
            .await
            .unwrap();

        // Name belongs to the verified account, email to the pending one.
        let result = store
            .create(new_account("Alpha Club", "beta@x.com", "secret456"))
            .await;

        assert_eq!(result.unwrap_err(), AccountStoreError::DuplicateActive);
        // The pending signup was not collateral damage.
        assert!(store.find_by_id(&pending.id()).await.is_ok());
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let store = store();
        store
            .create(new_account("Chess Club", "A@X.com", "secret123"))
            .await
            .unwrap();
        assert!(store.find_by_email(&email("a@x.com")).await.is_ok());
    }

    #[tokio::test]
    async fn delete_cascades_members_and_events() {
        let store = store();
        let account = store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();
        store
            .add_member(account.id(), "Alice".to_string())
            .await
            .unwrap();
        store
            .add_event(account.id(), "Blitz night".to_string(), Utc::now())
            .await
            .unwrap();

        store.delete(&account.id()).await.unwrap();

        assert!(store.members(&account.id()).await.is_empty());
        assert!(store.events(&account.id()).await.is_empty());
        assert_eq!(
            store.find_by_id(&account.id()).await.unwrap_err(),
            AccountStoreError::AccountNotFound
        );
    }

    #[tokio::test]
    async fn update_password_rehashes() {
        let store = store();
        let account = store
            .create(new_account("Chess Club", "a@x.com", "secret123"))
            .await
            .unwrap();

        store
            .update_password(&account.id(), password("a new password"))
            .await
            .unwrap();

        assert!(
            store
                .authenticate(&email("a@x.com"), &password("a new password"))
                .await
                .is_ok()
        );
        assert_eq!(
            store
                .authenticate(&email("a@x.com"), &password("secret123"))
                .await
                .unwrap_err(),
            AccountStoreError::IncorrectPassword
        );
    }

    #[tokio::test]
    async fn child_rows_require_an_existing_account() {
        let store = store();
        let result = store.add_member(AccountId::random(), "Bob".to_string()).await;
        assert_eq!(result.unwrap_err(), AccountStoreError::AccountNotFound);
    }
}
