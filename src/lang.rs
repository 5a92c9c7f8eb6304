// UI string tables for the four supported languages. Lookup falls back to
// English and then to the key itself, so a missing entry renders as its key
// rather than panicking mid-draw.

use crate::types::Language;

static EN: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("nodes", "Node Manager"),
    ("wallets", "Wallets"),
    ("airdrops", "Airdrops"),
    ("settings", "Settings"),
    ("search", "Search..."),
    ("addNew", "Add New"),
    ("export", "Export"),
    ("syncAll", "Sync All"),
    ("autoSync", "Auto-Sync"),
    ("activeNodes", "Active Nodes"),
    ("totalWallets", "Total Wallets"),
    ("pendingAirdrops", "Pending Airdrops"),
    ("recentStatus", "Recent Node Status"),
    ("upcomingDeadlines", "Upcoming Airdrop Deadlines"),
    ("connect", "Connect"),
    ("ping", "Ping"),
    ("general", "General"),
    ("appearance", "Appearance"),
    ("data", "Data Management"),
    ("language", "Language"),
    ("theme", "Theme"),
    ("clearData", "Clear All Data"),
    ("clearDataConfirm", "Are you sure? This will delete all your nodes, wallets, and airdrops locally."),
    ("resetSuccess", "Data reset successfully."),
    ("save", "Save Changes"),
    ("security", "Security"),
    ("setPass", "Set Password"),
    ("changePass", "Change Password"),
    ("passPlaceholder", "Enter password"),
    ("newPass", "New Password"),
    ("confirmPass", "Confirm Password"),
    ("currentPass", "Current Password"),
    ("passRequirement", "Minimum 6 characters"),
    ("passMismatch", "Passwords do not match"),
    ("passIncorrect", "Incorrect password"),
    ("enterPassToConfirm", "Enter password to confirm"),
];

static FR: &[(&str, &str)] = &[
    ("dashboard", "Tableau de bord"),
    ("nodes", "Gestion des Nœuds"),
    ("wallets", "Portefeuilles"),
    ("airdrops", "Airdrops"),
    ("settings", "Paramètres"),
    ("search", "Rechercher..."),
    ("addNew", "Ajouter"),
    ("export", "Exporter"),
    ("syncAll", "Synchro"),
    ("autoSync", "Auto-Sync"),
    ("activeNodes", "Nœuds Actifs"),
    ("totalWallets", "Total Portefeuilles"),
    ("pendingAirdrops", "Airdrops En Attente"),
    ("recentStatus", "État Récent des Nœuds"),
    ("upcomingDeadlines", "Dates Limites Airdrops"),
    ("connect", "Connecter"),
    ("ping", "Ping"),
    ("general", "Général"),
    ("appearance", "Apparence"),
    ("data", "Gestion des Données"),
    ("language", "Langue"),
    ("theme", "Thème"),
    ("clearData", "Effacer les Données"),
    ("clearDataConfirm", "Êtes-vous sûr ? Cela supprimera tous vos nœuds, portefeuilles et airdrops localement."),
    ("resetSuccess", "Données réinitialisées avec succès."),
    ("save", "Enregistrer"),
    ("security", "Sécurité"),
    ("setPass", "Définir le mot de passe"),
    ("changePass", "Changer le mot de passe"),
    ("passPlaceholder", "Entrez le mot de passe"),
    ("newPass", "Nouveau mot de passe"),
    ("confirmPass", "Confirmer le mot de passe"),
    ("currentPass", "Mot de passe actuel"),
    ("passRequirement", "Minimum 6 caractères"),
    ("passMismatch", "Les mots de passe ne correspondent pas"),
    ("passIncorrect", "Mot de passe incorrect"),
    ("enterPassToConfirm", "Entrez le mot de passe pour confirmer"),
];

static DE: &[(&str, &str)] = &[
    ("dashboard", "Dashboard"),
    ("nodes", "Knotenverwaltung"),
    ("wallets", "Wallets"),
    ("airdrops", "Airdrops"),
    ("settings", "Einstellungen"),
    ("search", "Suchen..."),
    ("addNew", "Hinzufügen"),
    ("export", "Exportieren"),
    ("syncAll", "Alle Sync"),
    ("autoSync", "Auto-Sync"),
    ("activeNodes", "Aktive Knoten"),
    ("totalWallets", "Alle Wallets"),
    ("pendingAirdrops", "Ausstehende"),
    ("recentStatus", "Aktueller Status"),
    ("upcomingDeadlines", "Kommende Fristen"),
    ("connect", "Verbinden"),
    ("ping", "Ping"),
    ("general", "Allgemein"),
    ("appearance", "Aussehen"),
    ("data", "Datenverwaltung"),
    ("language", "Sprache"),
    ("theme", "Design"),
    ("clearData", "Daten Löschen"),
    ("clearDataConfirm", "Sind Sie sicher? Alle lokalen Daten werden gelöscht."),
    ("resetSuccess", "Daten erfolgreich zurückgesetzt."),
    ("save", "Speichern"),
    ("security", "Sicherheit"),
    ("setPass", "Passwort festlegen"),
    ("changePass", "Passwort ändern"),
    ("passPlaceholder", "Passwort eingeben"),
    ("newPass", "Neues Passwort"),
    ("confirmPass", "Passwort bestätigen"),
    ("currentPass", "Aktuelles Passwort"),
    ("passRequirement", "Mindestens 6 Zeichen"),
    ("passMismatch", "Passwörter stimmen nicht überein"),
    ("passIncorrect", "Falsches Passwort"),
    ("enterPassToConfirm", "Passwort eingeben zur Bestätigung"),
];

static AR: &[(&str, &str)] = &[
    ("dashboard", "لوحة التحكم"),
    ("nodes", "إدارة العقد"),
    ("wallets", "المحافظ"),
    ("airdrops", "الإيردروب"),
    ("settings", "الإعدادات"),
    ("search", "بحث..."),
    ("addNew", "إضافة جديد"),
    ("export", "تصدير"),
    ("syncAll", "مزامنة الكل"),
    ("autoSync", "مزامنة تلقائية"),
    ("activeNodes", "العقد النشطة"),
    ("totalWallets", "إجمالي المحافظ"),
    ("pendingAirdrops", "إيردروب معلقة"),
    ("recentStatus", "حالة العقد الحديثة"),
    ("upcomingDeadlines", "المواعيد النهائية القادمة"),
    ("connect", "اتصال"),
    ("ping", "بينج"),
    ("general", "عام"),
    ("appearance", "المظهر"),
    ("data", "إدارة البيانات"),
    ("language", "اللغة"),
    ("theme", "السمة"),
    ("clearData", "مسح جميع البيانات"),
    ("clearDataConfirm", "هل أنت متأكد؟ سيؤدي هذا إلى حذف جميع البيانات محليًا."),
    ("resetSuccess", "تم إعادة تعيين البيانات بنجاح."),
    ("save", "حفظ التغييرات"),
    ("security", "الأمان"),
    ("setPass", "تعيين كلمة المرور"),
    ("changePass", "تغيير كلمة المرور"),
    ("passPlaceholder", "أدخل كلمة المرور"),
    ("newPass", "كلمة المرور الجديدة"),
    ("confirmPass", "تأكيد كلمة المرور"),
    ("currentPass", "كلمة المرور الحالية"),
    ("passRequirement", "6 أحرف على الأقل"),
    ("passMismatch", "كلمات المرور غير متطابقة"),
    ("passIncorrect", "كلمة المرور غير صحيحة"),
    ("enterPassToConfirm", "أدخل كلمة المرور للتأكيد"),
];

fn table(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::En => EN,
        Language::Fr => FR,
        Language::De => DE,
        Language::Ar => AR,
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn tr(lang: Language, key: &'static str) -> &'static str {
    lookup(table(lang), key)
        .or_else(|| lookup(EN, key))
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_language_covers_every_english_key() {
        for lang in [Language::En, Language::Fr, Language::De, Language::Ar] {
            for (key, _) in EN {
                assert!(
                    lookup(table(lang), key).is_some(),
                    "{:?} is missing key {}", lang, key
                );
            }
        }
    }

    #[test]
    fn unknown_key_falls_back_to_itself() {
        assert_eq!(tr(Language::Fr, "noSuchKey"), "noSuchKey");
    }

    #[test]
    fn known_key_resolves_per_language() {
        assert_eq!(tr(Language::En, "nodes"), "Node Manager");
        assert_eq!(tr(Language::De, "settings"), "Einstellungen");
    }
}
