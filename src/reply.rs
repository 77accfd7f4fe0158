// Reply templates: one canned reply per category.

use crate::classify::traits::Category;

const ACTIONABLE_REPLY: &str = "Olá! Obrigado pela mensagem.\n\n\
Entendi sua solicitação. Para agilizar, poderia confirmar:\n\
• Descrição do problema/pedido:\n\
• Sistema/versão envolvido(a):\n\
• Evidências (prints/logs), se houver:\n\n\
Assim que recebermos essas informações, daremos sequência e retornaremos com a solução ou próximos passos.\n\
Atenciosamente,";

const COURTESY_REPLY: &str = "Olá! Muito obrigado pela mensagem.\n\n\
Agradecemos o contato. Ficamos felizes com o retorno e permanecemos à disposição caso precise de algo.\n\
Abraços,";

/// Suggested reply for a category. The template depends on nothing else.
pub fn suggest_reply(category: Category) -> &'static str {
    match category {
        Category::Produtivo => ACTIONABLE_REPLY,
        Category::Improdutivo => COURTESY_REPLY,
    }
}
